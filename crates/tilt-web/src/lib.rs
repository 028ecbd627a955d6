#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use tilt_core::{
    attach, Attachment, BallScene, ChannelError, Channels, Mount, Presenter, Subscription,
    TICK_INTERVAL_MS,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;

use constants::{BALL_ID, COLOR_BUTTON_ID, PAGE_HIDE_EVENT, PAGE_SHOW_EVENT};
use events::{ClickChannel, DeviceMotionChannel, IntervalTimer, MouseMoveChannel};

/// Everything needed to wire the scene up again after the page is restored.
struct PageParts {
    window: web::Window,
    button: web::HtmlElement,
    permission: Result<(), ChannelError>,
    scene: Rc<RefCell<BallScene>>,
    presenter: Rc<RefCell<dyn Presenter>>,
}

impl PageParts {
    fn attach(&self) -> Result<Attachment, ChannelError> {
        let mut accel = DeviceMotionChannel::new(self.window.clone(), self.permission.clone());
        let mut pointer = MouseMoveChannel::new(self.window.clone());
        let mut timer = IntervalTimer::new(self.window.clone(), TICK_INTERVAL_MS);
        let mut color = ClickChannel::new(self.button.clone());

        let attachment = attach(
            Rc::clone(&self.scene),
            Rc::clone(&self.presenter),
            Channels {
                accel: &mut accel,
                pointer: &mut pointer,
                timer: &mut timer,
                color: &mut color,
            },
        )?;
        log::info!(
            "[attach] ready (accelerometer {})",
            if attachment.accelerometer_active() { "on" } else { "off" }
        );
        Ok(attachment)
    }
}

struct Page {
    parts: PageParts,
    mount: Mount,
    // pagehide/pageshow listeners, kept for the life of the document
    _lifecycle: Vec<Subscription>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tilt-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let ball = dom::html_element(&document, BALL_ID)?;
    let button = dom::html_element(&document, COLOR_BUTTON_ID)?;

    let permission = events::request_motion_permission(&window).await;

    let parts = PageParts {
        window: window.clone(),
        button,
        permission,
        scene: Rc::new(RefCell::new(BallScene::default())),
        presenter: Rc::new(RefCell::new(dom::DomPresenter::new(ball))),
    };
    let mount = Mount::new(parts.attach()?);
    let lifecycle = wire_lifecycle(&window)?;

    PAGE.with(|page| {
        *page.borrow_mut() = Some(Page {
            parts,
            mount,
            _lifecycle: lifecycle,
        })
    });
    Ok(())
}

/// Release the channels whenever the page is hidden and wire them up again
/// when a back/forward cached page is shown.
fn wire_lifecycle(window: &web::Window) -> Result<Vec<Subscription>, ChannelError> {
    let hide = events::listen(
        window,
        PAGE_HIDE_EVENT,
        "page",
        |ev: web::PageTransitionEvent| {
            PAGE.with(|page| {
                if let Some(page) = page.borrow_mut().as_mut() {
                    if page.mount.hide() {
                        log::info!("[page] hidden (persisted: {})", ev.persisted());
                    }
                }
            });
        },
    )?;
    let show = events::listen(
        window,
        PAGE_SHOW_EVENT,
        "page",
        |ev: web::PageTransitionEvent| {
            if !ev.persisted() {
                return;
            }
            PAGE.with(|page| {
                if let Some(page) = page.borrow_mut().as_mut() {
                    let Page { parts, mount, .. } = page;
                    match mount.show(|| parts.attach()) {
                        Ok(true) => log::info!("[page] restored from cache, reattached"),
                        Ok(false) => {}
                        Err(e) => log::error!("[page] reattach failed: {e}"),
                    }
                }
            });
        },
    )?;
    Ok(vec![hide, show])
}
