use super::listen;
use crate::constants::POINTER_MOVE_EVENT;
use crate::dom::viewport_size;
use tilt_core::{ChannelError, Handler, InputChannel, PointerSample, Subscription};
use web_sys as web;

/// `mousemove` on the window, measured against the current viewport.
pub struct MouseMoveChannel {
    window: web::Window,
}

impl MouseMoveChannel {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

impl InputChannel<PointerSample> for MouseMoveChannel {
    fn subscribe(
        &mut self,
        mut handler: Handler<PointerSample>,
    ) -> Result<Subscription, ChannelError> {
        let window = self.window.clone();
        listen(
            &self.window,
            POINTER_MOVE_EVENT,
            "pointer",
            move |ev: web::MouseEvent| {
                let (w, h) = viewport_size(&window);
                handler(PointerSample {
                    client_x: ev.client_x() as f64,
                    client_y: ev.client_y() as f64,
                    viewport_width: w,
                    viewport_height: h,
                });
            },
        )
    }
}
