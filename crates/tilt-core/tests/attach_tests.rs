use std::cell::RefCell;
use std::rc::Rc;
use tilt_core::*;

#[derive(Default)]
struct RecordingPresenter {
    views: Vec<BallView>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, view: &BallView) {
        self.views.push(*view);
    }
}

struct Rig {
    scene: Rc<RefCell<BallScene>>,
    presenter: Rc<RefCell<RecordingPresenter>>,
    accel: LocalChannel<AccelSample>,
    pointer: LocalChannel<PointerSample>,
    timer: LocalChannel<Tick>,
    color: LocalChannel<CycleColor>,
}

impl Rig {
    fn new() -> Self {
        Self {
            scene: Rc::new(RefCell::new(BallScene::default())),
            presenter: Rc::new(RefCell::new(RecordingPresenter::default())),
            accel: LocalChannel::new("accel"),
            pointer: LocalChannel::new("pointer"),
            timer: LocalChannel::new("timer"),
            color: LocalChannel::new("color"),
        }
    }

    fn attach(&mut self) -> Attachment {
        let presenter: Rc<RefCell<dyn Presenter>> = self.presenter.clone();
        attach(
            Rc::clone(&self.scene),
            presenter,
            Channels {
                accel: &mut self.accel,
                pointer: &mut self.pointer,
                timer: &mut self.timer,
                color: &mut self.color,
            },
        )
        .expect("attach")
    }

    fn last_view(&self) -> BallView {
        *self.presenter.borrow().views.last().expect("at least one view")
    }
}

fn pointer_at(x: f64, y: f64) -> PointerSample {
    PointerSample {
        client_x: x,
        client_y: y,
        viewport_width: 1000.0,
        viewport_height: 500.0,
    }
}

#[test]
fn attach_presents_initial_view() {
    let mut rig = Rig::new();
    let att = rig.attach();
    assert!(att.accelerometer_active());
    assert_eq!(att.subscription_count(), 4);
    let v = rig.last_view();
    assert_eq!((v.x_percent, v.y_percent, v.color_index), (50.0, 50.0, 0));
    assert_eq!(v.color, Palette::default().get(0));
}

#[test]
fn accelerometer_moves_ball_on_following_ticks() {
    let mut rig = Rig::new();
    let _att = rig.attach();
    rig.accel.emit(AccelSample {
        x: -10.0,
        y: 5.0,
        z: 9.8,
    });
    // impulse alone does not redraw
    assert_eq!(rig.presenter.borrow().views.len(), 1);

    rig.timer.emit(Tick);
    let v = rig.last_view();
    assert!((v.x_percent - 51.0).abs() < 1e-9);
    assert!((v.y_percent - 50.5).abs() < 1e-9);
}

#[test]
fn idle_ticks_do_not_redraw() {
    let mut rig = Rig::new();
    let _att = rig.attach();
    for _ in 0..10 {
        rig.timer.emit(Tick);
    }
    assert_eq!(rig.presenter.borrow().views.len(), 1);
}

#[test]
fn pointer_teleports_ball() {
    let mut rig = Rig::new();
    let _att = rig.attach();
    rig.pointer.emit(pointer_at(300.0, 350.0));
    let v = rig.last_view();
    assert!((v.x_percent - 30.0).abs() < 1e-9);
    assert!((v.y_percent - 70.0).abs() < 1e-9);
}

#[test]
fn color_command_cycles_and_redraws() {
    let mut rig = Rig::new();
    let _att = rig.attach();
    for _ in 0..5 {
        rig.color.emit(CycleColor);
    }
    assert_eq!(rig.last_view().color_index, 5);
    rig.color.emit(CycleColor);
    let v = rig.last_view();
    assert_eq!(v.color_index, 0);
    assert_eq!(v.color.to_hex(), "#3498db");
    assert_eq!(rig.presenter.borrow().views.len(), 7);
}

#[test]
fn missing_accelerometer_degrades_to_pointer_only() {
    let scene = Rc::new(RefCell::new(BallScene::default()));
    let recorder = Rc::new(RefCell::new(RecordingPresenter::default()));
    let presenter: Rc<RefCell<dyn Presenter>> = recorder.clone();
    let mut accel = UnavailableChannel::new("sensor missing");
    let mut pointer = LocalChannel::<PointerSample>::new("pointer");
    let mut timer = LocalChannel::<Tick>::new("timer");
    let mut color = LocalChannel::<CycleColor>::new("color");

    let att = attach(
        Rc::clone(&scene),
        presenter,
        Channels {
            accel: &mut accel,
            pointer: &mut pointer,
            timer: &mut timer,
            color: &mut color,
        },
    )
    .expect("pointer-only attach still succeeds");

    assert!(!att.accelerometer_active());
    assert_eq!(att.subscription_count(), 3);

    pointer.emit(pointer_at(100.0, 100.0));
    let p = scene.borrow().motion.position();
    assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 20.0).abs() < 1e-9);
}

#[test]
fn required_channel_failure_is_returned() {
    let scene = Rc::new(RefCell::new(BallScene::default()));
    let presenter: Rc<RefCell<dyn Presenter>> =
        Rc::new(RefCell::new(RecordingPresenter::default()));
    let mut accel = LocalChannel::<AccelSample>::new("accel");
    let mut pointer = LocalChannel::<PointerSample>::new("pointer");
    let mut timer = UnavailableChannel::new("no timer");
    let mut color = LocalChannel::<CycleColor>::new("color");

    let err = attach(
        scene,
        presenter,
        Channels {
            accel: &mut accel,
            pointer: &mut pointer,
            timer: &mut timer,
            color: &mut color,
        },
    )
    .unwrap_err();
    assert_eq!(err, ChannelError::Unavailable("no timer".into()));
    // the pointer subscription taken before the failure was released
    assert_eq!(pointer.subscriber_count(), 0);
}

#[test]
fn detach_releases_every_channel() {
    let mut rig = Rig::new();
    let att = rig.attach();
    att.detach();

    assert_eq!(rig.accel.emit(AccelSample::default()), 0);
    assert_eq!(rig.pointer.emit(pointer_at(1.0, 1.0)), 0);
    assert_eq!(rig.timer.emit(Tick), 0);
    assert_eq!(rig.color.emit(CycleColor), 0);
    assert_eq!(rig.scene.borrow().motion.position(), glam::DVec2::new(50.0, 50.0));
}

#[test]
fn degenerate_pointer_sample_is_ignored() {
    let mut rig = Rig::new();
    let _att = rig.attach();
    rig.pointer.emit(PointerSample {
        client_x: 10.0,
        client_y: 10.0,
        viewport_width: 0.0,
        viewport_height: 0.0,
    });
    assert_eq!(rig.presenter.borrow().views.len(), 1);
}

#[test]
fn color_command_can_tear_down_the_attachment() {
    let mut rig = Rig::new();
    let holder: Rc<RefCell<Option<Attachment>>> = Rc::new(RefCell::new(Some(rig.attach())));

    let h = Rc::clone(&holder);
    let _teardown = rig
        .color
        .subscribe(Box::new(move |_| {
            if let Some(att) = h.borrow_mut().take() {
                att.detach();
            }
        }))
        .expect("subscribe");

    rig.color.emit(CycleColor);
    assert!(holder.borrow().is_none());
    assert_eq!(rig.last_view().color_index, 1);

    // only the teardown handler is left on the color channel
    assert_eq!(rig.color.subscriber_count(), 1);
    assert_eq!(rig.timer.emit(Tick), 0);
    assert_eq!(rig.pointer.emit(pointer_at(1.0, 1.0)), 0);
}

#[test]
fn hidden_mount_stops_delivery() {
    let mut rig = Rig::new();
    let mut mount = Mount::new(rig.attach());
    assert!(mount.is_attached());

    assert!(mount.hide());
    assert!(!mount.is_attached());
    assert!(!mount.hide());
    assert_eq!(rig.timer.emit(Tick), 0);
    assert_eq!(rig.color.emit(CycleColor), 0);
}

#[test]
fn shown_mount_resumes_the_same_scene() {
    let mut rig = Rig::new();
    let mut mount = Mount::new(rig.attach());
    rig.color.emit(CycleColor);
    rig.pointer.emit(pointer_at(100.0, 100.0));
    mount.hide();

    let shown = mount.show(|| Ok::<_, ChannelError>(rig.attach()));
    assert_eq!(shown, Ok(true));
    assert!(mount.is_attached());

    // re-attaching presents the preserved state, not a fresh one
    let v = rig.last_view();
    assert_eq!((v.x_percent, v.y_percent, v.color_index), (10.0, 20.0, 1));

    rig.color.emit(CycleColor);
    assert_eq!(rig.last_view().color_index, 2);
    assert_eq!(rig.timer.subscriber_count(), 1);
}

#[test]
fn show_while_attached_is_a_no_op() {
    let mut rig = Rig::new();
    let mut mount = Mount::new(rig.attach());
    let shown = mount.show(|| Err(ChannelError::Rejected("should not run".into())));
    assert_eq!(shown, Ok(false));
    assert_eq!(rig.timer.subscriber_count(), 1);
    assert!(mount.is_attached());
    assert_eq!(rig.accel.subscriber_count(), 1);
}

#[test]
fn failed_show_leaves_mount_detached() {
    let mut rig = Rig::new();
    let mut mount = Mount::new(rig.attach());
    mount.hide();
    let shown = mount.show(|| Err(ChannelError::Rejected("timer".into())));
    assert_eq!(shown, Err(ChannelError::Rejected("timer".into())));
    assert!(!mount.is_attached());
}
