use tilt_core::{ChannelError, Handler, InputChannel, Subscription, Tick};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `setInterval` timer; clearing happens when the subscription is dropped.
pub struct IntervalTimer {
    window: web::Window,
    period_ms: u32,
}

impl IntervalTimer {
    pub fn new(window: web::Window, period_ms: u32) -> Self {
        Self { window, period_ms }
    }
}

impl InputChannel<Tick> for IntervalTimer {
    fn subscribe(&mut self, mut handler: Handler<Tick>) -> Result<Subscription, ChannelError> {
        let closure = Closure::wrap(Box::new(move || handler(Tick)) as Box<dyn FnMut()>);
        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                self.period_ms as i32,
            )
            .map_err(|e| ChannelError::Rejected(format!("setInterval: {:?}", e)))?;
        log::info!("[timer] interval {} every {}ms", handle, self.period_ms);

        let window = self.window.clone();
        Ok(Subscription::new("timer", move || {
            window.clear_interval_with_handle(handle);
            drop(closure);
        }))
    }
}
