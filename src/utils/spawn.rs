// ============================================================================
// TAREAS LOCALES - Un solo event loop, sin hilos
// ============================================================================

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

/// Future no-Send que corre en el event loop del navegador
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Lanza una tarea local sin esperarla (spawn_local en el navegador)
pub type Spawner = Rc<dyn Fn(LocalTask)>;

/// Espera `ms` milisegundos sin bloquear el loop
pub type Delay = Rc<dyn Fn(u32) -> LocalTask>;

pub fn browser_spawner() -> Spawner {
    Rc::new(|task: LocalTask| wasm_bindgen_futures::spawn_local(task))
}

pub fn browser_delay() -> Delay {
    Rc::new(|ms: u32| -> LocalTask {
        Box::pin(gloo_timers::future::TimeoutFuture::new(ms))
    })
}
