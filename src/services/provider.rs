// ============================================================================
// WALLET PROVIDER (EIP-1193) - Frontera con la wallet inyectada
// ============================================================================
// Solo transporte: `request` y suscripción a `accountsChanged`.
// Sin estado de aplicación, sin lógica de negocio.
// ============================================================================

use js_sys::{Array, Function, Object, Promise, Reflect, JSON};
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::VotingError;
use crate::utils::ACCOUNTS_CHANGED_EVENT;

/// Handler de `accountsChanged`: recibe las cuentas tal cual las reporta la wallet
pub type AccountsHandler = Box<dyn Fn(Vec<String>)>;

/// Provider EIP-1193.
///
/// `on_accounts_changed` devuelve un listener que se desregistra al hacer drop,
/// de modo que registrar y liberar van siempre en pareja.
#[allow(async_fn_in_trait)]
pub trait Eip1193 {
    type Listener;

    async fn request(&self, method: &str, params: Value) -> Result<Value, VotingError>;

    fn on_accounts_changed(&self, handler: AccountsHandler) -> Result<Self::Listener, VotingError>;
}

/// `window.ethereum`
pub struct InjectedProvider {
    ethereum: JsValue,
}

impl InjectedProvider {
    /// Detecta la wallet inyectada; su ausencia es `WalletUnavailable`
    pub fn detect() -> Result<Self, VotingError> {
        let window = web_sys::window().ok_or(VotingError::WalletUnavailable)?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum"))
            .map_err(|_| VotingError::WalletUnavailable)?;

        if ethereum.is_undefined() || ethereum.is_null() {
            return Err(VotingError::WalletUnavailable);
        }

        Ok(Self { ethereum })
    }

    fn method(&self, name: &str) -> Result<Function, VotingError> {
        Reflect::get(&self.ethereum, &JsValue::from_str(name))
            .map_err(js_error)?
            .dyn_into::<Function>()
            .map_err(|_| VotingError::Js(format!("window.ethereum.{} is not a function", name)))
    }
}

impl Eip1193 for InjectedProvider {
    type Listener = InjectedListener;

    async fn request(&self, method: &str, params: Value) -> Result<Value, VotingError> {
        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
            .map_err(js_error)?;
        Reflect::set(&args, &JsValue::from_str("params"), &to_js(&params)?).map_err(js_error)?;

        let promise = self
            .method("request")?
            .call1(&self.ethereum, &args)
            .map_err(js_error)?
            .dyn_into::<Promise>()
            .map_err(|_| VotingError::Js("ethereum.request did not return a promise".to_string()))?;

        let result = JsFuture::from(promise).await.map_err(js_error)?;
        from_js(&result)
    }

    fn on_accounts_changed(&self, handler: AccountsHandler) -> Result<InjectedListener, VotingError> {
        let closure = Closure::wrap(Box::new(move |accounts: JsValue| {
            let accounts: Vec<String> = Array::from(&accounts)
                .iter()
                .filter_map(|value| value.as_string())
                .collect();
            handler(accounts);
        }) as Box<dyn FnMut(JsValue)>);

        self.method("on")?
            .call2(
                &self.ethereum,
                &JsValue::from_str(ACCOUNTS_CHANGED_EVENT),
                closure.as_ref(),
            )
            .map_err(js_error)?;

        log::info!("👂 [PROVIDER] listener '{}' registrado", ACCOUNTS_CHANGED_EVENT);

        Ok(InjectedListener {
            ethereum: self.ethereum.clone(),
            closure,
        })
    }
}

/// Listener de `accountsChanged`. El closure vive mientras viva el listener
/// (no se usa `forget()`), y el drop lo quita con `removeListener`.
pub struct InjectedListener {
    ethereum: JsValue,
    closure: Closure<dyn FnMut(JsValue)>,
}

impl Drop for InjectedListener {
    fn drop(&mut self) {
        let remove = Reflect::get(&self.ethereum, &JsValue::from_str("removeListener"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());

        match remove {
            Some(remove) => {
                if let Err(e) = remove.call2(
                    &self.ethereum,
                    &JsValue::from_str(ACCOUNTS_CHANGED_EVENT),
                    self.closure.as_ref(),
                ) {
                    log::error!("❌ [PROVIDER] Error quitando listener: {:?}", e);
                } else {
                    log::info!("🔌 [PROVIDER] listener '{}' eliminado", ACCOUNTS_CHANGED_EVENT);
                }
            }
            None => log::warn!("⚠️ [PROVIDER] window.ethereum.removeListener no disponible"),
        }
    }
}

fn to_js(value: &Value) -> Result<JsValue, VotingError> {
    let json = serde_json::to_string(value)?;
    JSON::parse(&json).map_err(js_error)
}

fn from_js(value: &JsValue) -> Result<Value, VotingError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    let json: String = JSON::stringify(value).map_err(js_error)?.into();
    Ok(serde_json::from_str(&json)?)
}

/// Convierte un error JS (`{ code, message }` en EIP-1193) a `VotingError`
fn js_error(err: JsValue) -> VotingError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64())
        .map(|c| c as i64);
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));

    VotingError::from_provider(code, &message)
}
