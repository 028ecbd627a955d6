pub mod click;
pub mod motion;
pub mod pointer;
pub mod timer;

pub use click::ClickChannel;
pub use motion::{request_motion_permission, DeviceMotionChannel};
pub use pointer::MouseMoveChannel;
pub use timer::IntervalTimer;

use tilt_core::{ChannelError, Subscription};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Add a DOM listener whose lifetime is tied to the returned [`Subscription`].
///
/// Events that do not cast to `E` are skipped.
pub fn listen<E, F>(
    target: &web::EventTarget,
    event: &'static str,
    label: &'static str,
    mut handler: F,
) -> Result<Subscription, ChannelError>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| ChannelError::Rejected(format!("{event}: {:?}", e)))?;
    log::info!("[{label}] listening for {event}");

    let target = target.clone();
    Ok(Subscription::new(label, move || {
        _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        drop(closure);
    }))
}
