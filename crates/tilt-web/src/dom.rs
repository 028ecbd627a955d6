use tilt_core::{BallView, Presenter};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn html_element(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("#{id} is not an HTML element: {:?}", e))
}

/// Innermost viewport size in CSS pixels.
pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    (read(window.inner_width()), read(window.inner_height()))
}

/// Positions the ball element by percentage and paints its fill.
pub struct DomPresenter {
    ball: web::HtmlElement,
}

impl DomPresenter {
    pub fn new(ball: web::HtmlElement) -> Self {
        Self { ball }
    }
}

impl Presenter for DomPresenter {
    fn present(&mut self, view: &BallView) {
        let style = self.ball.style();
        let left = format!("{}%", view.x_percent);
        let top = format!("{}%", view.y_percent);
        let fill = view.color.to_hex();
        for (name, value) in [("left", &left), ("top", &top), ("background-color", &fill)] {
            if let Err(e) = style.set_property(name, value) {
                log::error!("[render] set {name} failed: {:?}", e);
            }
        }
    }
}
