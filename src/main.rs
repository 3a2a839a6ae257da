// main.rs
//
// Runs each reducer for one simulated second and prints the resulting ports.
// Usage: gearsim [--lang ko|en] [settings.json]
// The display language is remembered in .gearsim/gearSimLang.
// With the `svg-io` feature each drive is also written to svg/<topology>.svg.

use gearsim::drive::{PortRole, TopologyKind};
use gearsim::float_types::RAD_TO_DEG;
use gearsim::i18n::{FileStore, Language};
use gearsim::sim::{SimulationController, SimulationSettings};
use std::fs;

#[cfg(feature = "svg-io")]
use gearsim::io::ToSVG;

fn main() {
    #[cfg(feature = "svg-io")]
    let _ = fs::create_dir_all("svg");

    let mut language: Option<Language> = None;
    let mut settings_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--lang" {
            match args.next().map(|code| code.parse()) {
                Some(Ok(lang)) => language = Some(lang),
                Some(Err(err)) => {
                    eprintln!("--lang: {err}");
                    return;
                },
                None => {
                    eprintln!("--lang needs a language code");
                    return;
                },
            }
        } else {
            settings_path = Some(arg);
        }
    }

    let settings = match settings_path {
        Some(path) => match fs::read_to_string(&path) {
            Ok(json) => match SimulationSettings::from_json_str(&json) {
                Ok(settings) => settings,
                Err(err) => {
                    eprintln!("{path}: {err}");
                    return;
                },
            },
            Err(err) => {
                eprintln!("{path}: {err}");
                return;
            },
        },
        None => SimulationSettings::default(),
    };
    let mut preferences = FileStore::new(".gearsim");
    let mut controller = match SimulationController::with_preferences(settings, &preferences) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("could not start the simulation: {err}");
            return;
        },
    };
    if let Some(language) = language {
        if let Err(err) = controller.set_language(language, &mut preferences) {
            eprintln!("could not save the language: {err}");
        }
    }

    for kind in TopologyKind::ALL {
        if let Err(err) = controller.switch_topology(kind) {
            eprintln!("{kind}: {err}");
            continue;
        }
        for _ in 0..60 {
            controller.tick();
        }

        println!(
            "{kind}: {} (input turned {:.1} deg)",
            controller.ratio_summary(),
            controller.input_angle() * RAD_TO_DEG
        );
        for (role, port) in controller.port_values() {
            let role = match role {
                PortRole::Input => "input",
                PortRole::Output => "output",
                PortRole::Fixed => "fixed",
            };
            let torque = port
                .torque
                .map_or_else(|| "-".to_owned(), |t| format!("{t:.2} {}", controller.unit()));
            println!(
                "  {role:<6} {:<16} torque {torque:>12}  speed {:>8.2} deg/s",
                controller.label(port.part.label_key()),
                port.angular_velocity
            );
        }

        #[cfg(feature = "svg-io")]
        let _ = fs::write(format!("svg/{kind}.svg"), controller.to_svg());
    }
}
