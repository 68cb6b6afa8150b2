use anyhow::Context as _;
use argh::FromArgs;
use evdev_rs::enums::{EventCode, InputProp, EV_ABS, EV_KEY, EV_SYN};
use evdev_rs::{DeviceWrapper as _, InputEvent, UInputDevice};
use evdev_utils::AsyncDevice;
use evdev_utils::DeviceWrapperExt as _;
use futures::TryStreamExt as _;
use log::{debug, info, trace};
use socdbox::{Buttons, ControllerConfig, DpadMode, Engine, GamepadReport, HotkeyBindings, SocdMode};

#[derive(FromArgs)]
/// Keyboard to gamepad remapping with SOCD cleaning.
struct Args {
    /// log level
    #[argh(option, short = 'l', default = "log::LevelFilter::Info")]
    log_level: log::LevelFilter,
    /// SOCD cleaning mode, e.g. neutral, last-input, x-left-y-up
    #[argh(option, short = 's', default = "SocdMode::Neutral")]
    socd_mode: SocdMode,
    /// where directions are reported: digital, left-analog or right-analog
    #[argh(option, short = 'd', default = "DpadMode::Digital")]
    dpad_mode: DpadMode,
    /// swap left and right
    #[argh(switch)]
    invert_x: bool,
    /// swap up and down
    #[argh(switch)]
    invert_y: bool,
}

fn send_syn(l: &UInputDevice) -> std::io::Result<()> {
    l.write_event(&InputEvent {
        event_code: EventCode::EV_SYN(EV_SYN::SYN_REPORT),
        value: 0,
        time: evdev_rs::TimeVal {
            tv_sec: 0,
            tv_usec: 0,
        },
    })
}

fn send_event(l: &UInputDevice, event_code: EventCode, value: i32) -> std::io::Result<()> {
    let event = InputEvent {
        event_code,
        value,
        time: evdev_rs::TimeVal {
            tv_sec: 0,
            tv_usec: 0,
        },
    };
    info!("injecting event: {:?} {:?}", event_code, value);
    let () = l.write_event(&event)?;
    let () = send_syn(l)?;
    Ok(())
}

fn send_stick(l: &UInputDevice, axes: (EV_ABS, EV_ABS), xy: (i32, i32)) -> std::io::Result<()> {
    let (x_axis, y_axis) = axes;
    let (x, y) = xy;
    let () = send_event(l, EventCode::EV_ABS(x_axis), x)?;
    let () = send_event(l, EventCode::EV_ABS(y_axis), y)?;
    let () = send_syn(l)?;
    Ok(())
}

fn log_event(event: &InputEvent) {
    match event.event_code {
        EventCode::EV_MSC(_) | EventCode::EV_SYN(_) | EventCode::EV_REL(_) => {
            trace!("event: {:?}", event)
        }
        _ => debug!("event: {:?}", event),
    }
}

const STICK_ABSINFO: libc::input_absinfo = libc::input_absinfo {
    value: 0,
    minimum: -127,
    maximum: 127,
    fuzz: 0,
    flat: 0,
    resolution: 0,
};

// Keyboard layout of the box, directions on the left hand and the thumb.
const KEYMAP: [(EV_KEY, Buttons); 18] = [
    (EV_KEY::KEY_O, Buttons::LEFT),
    (EV_KEY::KEY_E, Buttons::DOWN),
    (EV_KEY::KEY_U, Buttons::RIGHT),
    (EV_KEY::KEY_ENTER, Buttons::UP),
    (EV_KEY::KEY_BACKSPACE, Buttons::B1),
    (EV_KEY::KEY_H, Buttons::B2),
    (EV_KEY::KEY_N, Buttons::B3),
    (EV_KEY::KEY_V, Buttons::B4),
    (EV_KEY::KEY_Q, Buttons::L1),
    (EV_KEY::KEY_T, Buttons::R1),
    (EV_KEY::KEY_S, Buttons::L2),
    (EV_KEY::KEY_M, Buttons::R2),
    (EV_KEY::KEY_A, Buttons::S1),
    (EV_KEY::KEY_Y, Buttons::S2),
    (EV_KEY::KEY_LEFTSHIFT, Buttons::L3),
    (EV_KEY::KEY_SPACE, Buttons::R3),
    (EV_KEY::KEY_SEMICOLON, Buttons::A1),
    (EV_KEY::KEY_Z, Buttons::A2),
];

// Gamepad buttons reported as-is. A1 doubles as home, A2 as capture.
const PASSTHROUGH: [(Buttons, EV_KEY); 12] = [
    (Buttons::B1, EV_KEY::BTN_SOUTH),
    (Buttons::B2, EV_KEY::BTN_EAST),
    (Buttons::B3, EV_KEY::BTN_WEST),
    (Buttons::B4, EV_KEY::BTN_NORTH),
    (Buttons::L1, EV_KEY::BTN_TL),
    (Buttons::R1, EV_KEY::BTN_TR),
    (Buttons::L2, EV_KEY::BTN_TL2),
    (Buttons::R2, EV_KEY::BTN_TR2),
    (Buttons::S1, EV_KEY::BTN_SELECT),
    (Buttons::S2, EV_KEY::BTN_START),
    (Buttons::L3, EV_KEY::BTN_THUMBL),
    (Buttons::R3, EV_KEY::BTN_THUMBR),
];

const DPAD_KEYS: [(Buttons, EV_KEY); 4] = [
    (Buttons::UP, EV_KEY::BTN_DPAD_UP),
    (Buttons::DOWN, EV_KEY::BTN_DPAD_DOWN),
    (Buttons::LEFT, EV_KEY::BTN_DPAD_LEFT),
    (Buttons::RIGHT, EV_KEY::BTN_DPAD_RIGHT),
];

fn send_report(
    l: &UInputDevice,
    report: &GamepadReport,
    previous: &GamepadReport,
) -> std::io::Result<()> {
    let keys = PASSTHROUGH
        .iter()
        .map(|&(button, key)| {
            let held = report.buttons.contains(button);
            (key, held, previous.buttons.contains(button))
        })
        .chain(DPAD_KEYS.iter().map(|&(button, key)| {
            (key, report.dpad.contains(button), previous.dpad.contains(button))
        }))
        .chain(std::iter::once((EV_KEY::BTN_MODE, report.home, previous.home)))
        .chain(std::iter::once((
            EV_KEY::BTN_TRIGGER_HAPPY1,
            report.capture,
            previous.capture,
        )));
    for (key, held, was_held) in keys {
        if held != was_held {
            let () = send_event(l, EventCode::EV_KEY(key), i32::from(held))?;
        }
    }
    if report.left_stick != previous.left_stick {
        let () = send_stick(l, (EV_ABS::ABS_X, EV_ABS::ABS_Y), report.left_stick)?;
    }
    if report.right_stick != previous.right_stick {
        let () = send_stick(l, (EV_ABS::ABS_RX, EV_ABS::ABS_RY), report.right_stick)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let Args {
        log_level,
        socd_mode,
        dpad_mode,
        invert_x,
        invert_y,
    } = argh::from_env();

    let () = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .with_module_level(std::module_path!(), log_level)
        .init()
        .context("failed to initialize logger")?;

    let config = ControllerConfig {
        socd_mode,
        dpad_mode,
        invert_x,
        invert_y,
        ..Default::default()
    };
    info!("starting with {:?}", config);
    let mut engine = Engine::new(config, HotkeyBindings::firmware_defaults());

    let keeb_path = futures::executor::block_on(evdev_utils::identify_keyboard())
        .context("failed to identify keyboard")?;
    info!("found keyboard {:?}", keeb_path);

    let uninit_device = evdev_rs::UninitDevice::new().context("failed to create uninit device")?;
    uninit_device.set_name("socdbox");
    uninit_device.set_bustype(3);
    let () = uninit_device
        .enable(&InputProp::INPUT_PROP_BUTTONPAD)
        .context("enable buttonpad prop")?;
    let () = uninit_device
        .enable_gamepad()
        .context("failed to enable gamepad functionality")?;
    for key in [EV_KEY::BTN_MODE, EV_KEY::BTN_TRIGGER_HAPPY1] {
        let () = uninit_device
            .enable_event_code(&EventCode::EV_KEY(key), None)
            .with_context(|| format!("failed to enable {:?}", key))?;
    }
    for axis in [EV_ABS::ABS_X, EV_ABS::ABS_Y, EV_ABS::ABS_RX, EV_ABS::ABS_RY] {
        let () = uninit_device
            .enable_event_code(&EventCode::EV_ABS(axis), Some(&STICK_ABSINFO))
            .with_context(|| format!("failed to enable {:?}", axis))?;
    }
    let l = UInputDevice::create_from_device(&uninit_device).context("create uinput device")?;

    let keeb_device = AsyncDevice::new(keeb_path).context("failed to create keyboard device")?;
    let mut held = Buttons::empty();
    let mut report = GamepadReport::default();

    let () = futures::executor::block_on(keeb_device.try_for_each(|event| {
        log_event(&event);
        let InputEvent {
            time: _,
            event_code,
            value,
        } = event;
        if value == 2 {
            return futures::future::ready(Ok(()));
        }
        let button = match event_code {
            EventCode::EV_KEY(key) => KEYMAP
                .iter()
                .find(|(mapped, _)| *mapped == key)
                .map(|&(_, button)| button),
            _ => None,
        };
        let button = match button {
            Some(button) => button,
            None => return futures::future::ready(Ok(())),
        };
        held.set(button, value == 1);

        let frame = engine.process_frame(held);
        if frame.hotkeys.config_changed {
            info!("config changed: {:?}", engine.config());
        }
        let next = GamepadReport::new(held, &frame);
        let result = send_report(&l, &next, &report);
        report = next;
        futures::future::ready(result)
    }))
    .context("keyboard event stream ended")?;
    Ok(())
}
