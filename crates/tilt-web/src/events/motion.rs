use super::listen;
use crate::constants::DEVICE_MOTION_EVENT;
use tilt_core::{AccelSample, ChannelError, Handler, InputChannel, Subscription};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn device_motion_ctor(window: &web::Window) -> Option<JsValue> {
    js_sys::Reflect::get(window, &JsValue::from_str("DeviceMotionEvent"))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Ask for motion access where the browser gates it behind
/// `DeviceMotionEvent.requestPermission()` (iOS Safari). Elsewhere this is a no-op.
pub async fn request_motion_permission(window: &web::Window) -> Result<(), ChannelError> {
    let ctor = device_motion_ctor(window)
        .ok_or_else(|| ChannelError::Unavailable("DeviceMotionEvent not supported".into()))?;
    let request = js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
    let Some(request) = request else {
        return Ok(());
    };
    let promise = request
        .call0(&ctor)
        .and_then(|p| p.dyn_into::<js_sys::Promise>())
        .map_err(|e| ChannelError::Rejected(format!("requestPermission: {:?}", e)))?;
    let state = JsFuture::from(promise)
        .await
        .map_err(|_| ChannelError::PermissionDenied)?;
    match state.as_string().as_deref() {
        Some("granted") => Ok(()),
        _ => Err(ChannelError::PermissionDenied),
    }
}

/// `devicemotion` events on the window. Missing axis readings count as zero.
pub struct DeviceMotionChannel {
    window: web::Window,
    permission: Result<(), ChannelError>,
}

impl DeviceMotionChannel {
    pub fn new(window: web::Window, permission: Result<(), ChannelError>) -> Self {
        Self { window, permission }
    }
}

impl InputChannel<AccelSample> for DeviceMotionChannel {
    fn subscribe(
        &mut self,
        mut handler: Handler<AccelSample>,
    ) -> Result<Subscription, ChannelError> {
        self.permission.clone()?;
        listen(
            &self.window,
            DEVICE_MOTION_EVENT,
            "motion",
            move |ev: web::DeviceMotionEvent| {
                let Some(acc) = ev.acceleration_including_gravity() else {
                    return;
                };
                handler(AccelSample {
                    x: acc.x().unwrap_or(0.0),
                    y: acc.y().unwrap_or(0.0),
                    z: acc.z().unwrap_or(0.0),
                });
            },
        )
    }
}
