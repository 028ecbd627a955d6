//! Wires a [`BallScene`] to its input channels and a presenter.

use crate::channel::{ChannelError, CycleColor, InputChannel, Subscription, Tick};
use crate::motion::{AccelSample, PointerSample};
use crate::scene::{BallScene, BallView};
use std::cell::RefCell;
use std::rc::Rc;

/// Consumer of render snapshots (DOM element, GPU renderer, test recorder).
pub trait Presenter {
    fn present(&mut self, view: &BallView);
}

pub struct Channels<'a> {
    pub accel: &'a mut dyn InputChannel<AccelSample>,
    pub pointer: &'a mut dyn InputChannel<PointerSample>,
    pub timer: &'a mut dyn InputChannel<Tick>,
    pub color: &'a mut dyn InputChannel<CycleColor>,
}

/// Live wiring between a scene and its channels. Dropping it unsubscribes everything.
#[derive(Debug)]
pub struct Attachment {
    subscriptions: Vec<Subscription>,
    accelerometer_active: bool,
}

impl Attachment {
    pub fn accelerometer_active(&self) -> bool {
        self.accelerometer_active
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn detach(self) {
        log::info!("[attach] detaching {} subscriptions", self.subscriptions.len());
        drop(self);
    }
}

fn route<T: 'static>(
    scene: &Rc<RefCell<BallScene>>,
    presenter: &Rc<RefCell<dyn Presenter>>,
    apply: fn(&mut BallScene, T) -> bool,
) -> Box<dyn FnMut(T)> {
    let scene = Rc::clone(scene);
    let presenter = Rc::clone(presenter);
    Box::new(move |event: T| {
        let changed = apply(&mut scene.borrow_mut(), event);
        if changed {
            let view = scene.borrow().view();
            presenter.borrow_mut().present(&view);
        }
    })
}

/// Subscribe `scene` to all four channels.
///
/// Pointer, timer and color channels are required and their errors are
/// returned. A failing accelerometer is logged and the scene runs
/// pointer-only.
pub fn attach(
    scene: Rc<RefCell<BallScene>>,
    presenter: Rc<RefCell<dyn Presenter>>,
    channels: Channels<'_>,
) -> Result<Attachment, ChannelError> {
    let initial = scene.borrow().view();
    presenter.borrow_mut().present(&initial);

    let mut subscriptions = Vec::with_capacity(4);
    subscriptions.push(
        channels
            .pointer
            .subscribe(route(&scene, &presenter, BallScene::on_pointer))?,
    );
    subscriptions.push(
        channels
            .timer
            .subscribe(route(&scene, &presenter, BallScene::on_tick))?,
    );
    subscriptions.push(
        channels
            .color
            .subscribe(route(&scene, &presenter, BallScene::on_cycle_color))?,
    );

    let accelerometer_active = match channels
        .accel
        .subscribe(route(&scene, &presenter, BallScene::on_accel))
    {
        Ok(sub) => {
            subscriptions.push(sub);
            log::info!("[attach] accelerometer subscribed");
            true
        }
        Err(e) => {
            log::warn!("[attach] accelerometer unavailable, pointer-only: {e}");
            false
        }
    };

    Ok(Attachment {
        subscriptions,
        accelerometer_active,
    })
}

/// Attachment slot for a scene that outlives its wiring.
///
/// A page kept in the browser's back/forward cache is hidden and later shown
/// again with the same scene; `hide` releases the channels and `show` wires
/// them back up if nothing is attached.
#[derive(Debug, Default)]
pub struct Mount {
    attachment: Option<Attachment>,
}

impl Mount {
    pub fn new(attachment: Attachment) -> Self {
        Self {
            attachment: Some(attachment),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Detach if attached. Returns whether anything was released.
    pub fn hide(&mut self) -> bool {
        match self.attachment.take() {
            Some(attachment) => {
                attachment.detach();
                true
            }
            None => false,
        }
    }

    /// Run `reattach` only when detached. Returns whether it ran.
    pub fn show<E>(
        &mut self,
        reattach: impl FnOnce() -> Result<Attachment, E>,
    ) -> Result<bool, E> {
        if self.attachment.is_some() {
            return Ok(false);
        }
        self.attachment = Some(reattach()?);
        Ok(true)
    }
}
