use super::listen;
use tilt_core::{ChannelError, CycleColor, Handler, InputChannel, Subscription};
use web_sys as web;

/// Clicks on the "change color" button.
pub struct ClickChannel {
    button: web::HtmlElement,
}

impl ClickChannel {
    pub fn new(button: web::HtmlElement) -> Self {
        Self { button }
    }
}

impl InputChannel<CycleColor> for ClickChannel {
    fn subscribe(&mut self, mut handler: Handler<CycleColor>) -> Result<Subscription, ChannelError> {
        listen(&self.button, "click", "color", move |_: web::MouseEvent| {
            handler(CycleColor)
        })
    }
}
