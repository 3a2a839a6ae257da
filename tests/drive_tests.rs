use approx::assert_relative_eq;
use gearsim::drive::{
    CycloidalConfig, CycloidalDrive, Drive, DriveConfig, DriveTopology, HarmonicConfig,
    HarmonicDrive, Part, PartProfiles, PlanetaryConfig, PlanetaryDrive, PortRole, TopologyKind,
};
use gearsim::errors::ConfigError;
use gearsim::float_types::{PI, Real};
use gearsim::profile::shapes::MAX_COUNT;

mod support;

use crate::support::{max_radius, ring_self_intersects, rings_cross};

#[test]
fn planetary_reference_configuration() {
    let drive = PlanetaryDrive::new(PlanetaryConfig::new(20, 60)).unwrap();
    assert_relative_eq!(drive.ratio(), 0.25);
    assert_relative_eq!(drive.reduction(), 4.0);
    assert_eq!(drive.config().planet_teeth(), 20);

    let ports = drive.port_values(10.0, 60.0);
    let output = ports[&PortRole::Output];
    assert_eq!(output.part, Part::Carrier);
    assert_relative_eq!(output.torque.unwrap(), 40.0);
    assert_relative_eq!(output.angular_velocity, 15.0);

    let fixed = ports[&PortRole::Fixed];
    assert_eq!(fixed.part, Part::Ring);
    assert_relative_eq!(fixed.torque.unwrap(), 30.0);
    assert_eq!(fixed.angular_velocity, 0.0);

    let summary = drive.ratio_summary();
    assert_eq!(summary.gear_ratio.as_deref(), Some("1:3.00"));
    assert_eq!(summary.reduction, "1:4.00");
}

#[test]
fn planetary_validity() {
    assert!(!PlanetaryDrive::validate(&PlanetaryConfig::new(3, 60)));
    assert!(!PlanetaryDrive::validate(&PlanetaryConfig::new(20, 19)));
    assert!(!PlanetaryDrive::validate(&PlanetaryConfig::new(20, 61)));
    assert!(!PlanetaryDrive::validate(&PlanetaryConfig::new(20, 60).with_module(0.0)));
    assert!(PlanetaryDrive::validate(&PlanetaryConfig::new(5, 5)));
    assert!(PlanetaryDrive::validate(&PlanetaryConfig::new(12, 48)));
}

#[test]
fn planetary_without_planet_teeth_omits_planets() {
    let drive = PlanetaryDrive::new(PlanetaryConfig::new(20, 20)).unwrap();
    let profiles = drive.profiles().unwrap();
    assert!(!profiles.keys().any(|part| matches!(part, Part::Planet(_))));
    assert_eq!(drive.planet_angle(), 0.0);
}

#[test]
fn planetary_step_derives_carrier_and_planets() {
    let mut drive = PlanetaryDrive::default();
    drive.step(1.0, 0.5);
    drive.step(1.0, 0.5);
    assert_relative_eq!(drive.sun_angle(), 1.0);
    assert_relative_eq!(drive.carrier_angle(), 0.25);
    // planets counter-rotate relative to the carrier at S/P
    assert_relative_eq!(drive.planet_angle(), -0.75);

    let poses = drive.poses();
    let planet = poses[&Part::Planet(0)];
    let centre = planet.offset.unwrap();
    assert_relative_eq!(centre.norm(), 10.0, epsilon = 1e-9);
    assert_relative_eq!(centre.y.atan2(centre.x), 0.25, epsilon = 1e-9);
}

#[test]
fn harmonic_reference_configuration() {
    let drive = HarmonicDrive::new(HarmonicConfig::new(200, 202)).unwrap();
    assert_relative_eq!(drive.ratio(), -100.0);
    assert_relative_eq!(drive.reduction(), 100.0);

    let ports = drive.port_values(10.0, 60.0);
    assert_relative_eq!(ports[&PortRole::Output].torque.unwrap(), -0.1);
    assert_eq!(ports[&PortRole::Fixed].part, Part::CircularSpline);
    assert_eq!(ports[&PortRole::Fixed].torque, None);
    assert_eq!(ports[&PortRole::Fixed].angular_velocity, 0.0);
    assert_eq!(drive.ratio_summary().reduction, "1:100.0");
}

#[test]
fn harmonic_validity() {
    assert!(!HarmonicDrive::validate(&HarmonicConfig::new(49, 60)));
    assert!(!HarmonicDrive::validate(&HarmonicConfig::new(200, 200)));
    assert!(HarmonicDrive::validate(&HarmonicConfig::new(50, 51)));
}

#[test]
fn harmonic_bearings_ride_inside_the_flexspline() {
    let drive = HarmonicDrive::default();
    let layouts = drive.layouts().unwrap();
    let bearings = &layouts[&Part::Flexspline];
    assert_eq!(bearings.len(), 20);
    assert_relative_eq!(max_radius(bearings), 5.0 * 0.85, epsilon = 1e-9);
}

#[test]
fn cycloidal_reference_configuration() {
    let mut drive = CycloidalDrive::new(CycloidalConfig::new(10, 11)).unwrap();
    assert_relative_eq!(drive.config().k(), 10.0);
    assert_relative_eq!(drive.ratio(), -1.0 / 11.0);
    assert_relative_eq!(drive.reduction(), 11.0);

    let ports = drive.port_values(10.0, 110.0);
    assert_relative_eq!(ports[&PortRole::Output].torque.unwrap(), 110.0);
    assert_relative_eq!(ports[&PortRole::Output].angular_velocity, -10.0);
    assert_eq!(ports[&PortRole::Fixed].part, Part::PinWheel);

    drive.step(PI, 1.0);
    assert_relative_eq!(drive.disc_angle(), -PI / 11.0);
    let offset = drive.disc_offset();
    assert_relative_eq!(offset.x, -0.5, epsilon = 1e-9);
    assert_relative_eq!(offset.y, 0.0, epsilon = 1e-9);
    assert_eq!(drive.ratio_summary().reduction, "1:11.0");
}

#[test]
fn cycloidal_validity() {
    assert!(!CycloidalDrive::validate(&CycloidalConfig::new(4, 5)));
    assert!(!CycloidalDrive::validate(&CycloidalConfig::new(10, 10)));
    assert!(CycloidalDrive::validate(&CycloidalConfig::new(5, 6)));
    assert!(CycloidalDrive::validate(&CycloidalConfig::new(10, 13)));
}

#[test]
fn rejected_config_leaves_drive_untouched() {
    let mut drive = PlanetaryDrive::default();
    drive.step(2.0, 1.0);
    let err = drive.apply_config(PlanetaryConfig::new(3, 60)).unwrap_err();
    assert_eq!(err, ConfigError::InvalidPlanetary { sun: 3, ring: 60 });
    assert_eq!(*drive.config(), PlanetaryConfig::new(20, 60));
    assert_relative_eq!(drive.sun_angle(), 2.0);
}

#[test]
fn reapplying_the_same_config_is_a_no_op() {
    let mut drive = HarmonicDrive::default();
    drive.step(1.0, 1.0);
    drive.apply_config(HarmonicConfig::new(200, 202)).unwrap();
    assert_relative_eq!(drive.wave_angle(), 1.0);

    drive.apply_config(HarmonicConfig::new(100, 102)).unwrap();
    assert_eq!(drive.wave_angle(), 0.0);
    assert_eq!(drive.flex_angle(), 0.0);
    assert_relative_eq!(drive.ratio(), -50.0);
}

#[test]
fn fixed_port_never_moves() {
    for kind in TopologyKind::ALL {
        let drive = DriveTopology::new(kind, 0.5);
        for speed in [-120.0, 0.0, 37.5, 720.0] {
            let ports = drive.port_values(5.0, speed);
            assert_eq!(ports[&PortRole::Fixed].angular_velocity, 0.0, "{kind}");
            assert_eq!(ports[&PortRole::Input].angular_velocity, speed, "{kind}");
        }
    }
}

#[test]
fn output_angle_follows_input_angle() {
    for kind in TopologyKind::ALL {
        let mut drive = DriveTopology::new(kind, 0.5);
        for _ in 0..100 {
            drive.step(1.3, 0.01);
        }
        assert_relative_eq!(drive.input_angle(), 1.3, epsilon = 1e-9);

        let output_part = drive.port_values(1.0, 1.0)[&PortRole::Output].part;
        let output_angle = drive.poses()[&output_part].angle;
        assert_relative_eq!(output_angle, drive.input_angle() * drive.ratio(), epsilon = 1e-9);
    }
}

#[test]
fn mismatched_config_is_rejected() {
    let mut drive = DriveTopology::new(TopologyKind::Planetary, 0.5);
    let err = drive
        .apply_config(DriveConfig::Cycloidal(CycloidalConfig::default()))
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::TopologyMismatch {
            active: TopologyKind::Planetary,
            given: TopologyKind::Cycloidal,
        }
    );
    assert!(!drive.validate(&HarmonicConfig::default().into()));
    assert!(drive.validate(&PlanetaryConfig::new(12, 48).into()));
}

fn assert_closed_and_simple(profiles: &PartProfiles, context: &str) {
    for (part, profile) in profiles {
        let outer = profile.outer();
        assert!(outer.len() >= 3, "{context} {part}");
        assert!(!ring_self_intersects(&outer), "{context} {part} outline self-intersects");
        for hole in profile.holes() {
            assert!(!ring_self_intersects(&hole), "{context} {part} hole self-intersects");
            assert!(!rings_cross(&outer, &hole), "{context} {part} hole crosses outline");
            assert!(
                profile.max_hole_radius() < profile.min_radius(),
                "{context} {part} hole reaches the outline"
            );
        }
    }
}

#[test]
fn default_profiles_are_closed_and_simple() {
    for kind in TopologyKind::ALL {
        let drive = DriveTopology::new(kind, 0.5);
        assert_closed_and_simple(&drive.profiles().unwrap(), &kind.to_string());
    }
}

#[test]
fn planetary_profiles_stay_simple_across_valid_counts() {
    for sun in 5..=30 {
        // R = S (no planets) up to a 1:7 ring, always the same parity as S.
        for ring in (sun..=sun * 6).step_by(2) {
            let drive = PlanetaryDrive::new(PlanetaryConfig::new(sun, ring)).unwrap();
            assert_closed_and_simple(&drive.profiles().unwrap(), &format!("S={sun} R={ring}"));
        }
    }
}

#[test]
fn cycloidal_profiles_stay_simple_across_valid_counts() {
    for lobes in 5..=40 {
        for pins in lobes + 1..=lobes + 5 {
            let drive = CycloidalDrive::new(CycloidalConfig::new(lobes, pins)).unwrap();
            assert_closed_and_simple(&drive.profiles().unwrap(), &format!("D={lobes} P={pins}"));
        }
    }
}

#[test]
fn harmonic_profiles_stay_simple_across_valid_counts() {
    for flex in [50, 51, 80, 120] {
        for circular in [flex + 1, flex + 2, flex + 4] {
            let drive = HarmonicDrive::new(HarmonicConfig::new(flex, circular)).unwrap();
            assert_closed_and_simple(&drive.profiles().unwrap(), &format!("F={flex} C={circular}"));
        }
    }
}

#[test]
fn tooth_counts_are_capped() {
    assert!(!HarmonicDrive::validate(&HarmonicConfig::new(1_000_000_000, 1_000_000_001)));
    assert!(HarmonicDrive::validate(&HarmonicConfig::new(9_998, MAX_COUNT)));
    assert!(!HarmonicDrive::validate(&HarmonicConfig::new(9_999, MAX_COUNT + 1)));
    assert!(!PlanetaryDrive::validate(&PlanetaryConfig::new(20, MAX_COUNT + 20)));
    assert!(!CycloidalDrive::validate(&CycloidalConfig::new(10, MAX_COUNT + 1)));

    let mut drive = HarmonicDrive::default();
    let err = drive
        .apply_config(HarmonicConfig::new(1_000_000_000, 1_000_000_001))
        .unwrap_err();
    assert_eq!(err.message_key(), "alertInvalidFlex");
    assert_eq!(*drive.config(), HarmonicConfig::default());
}

#[test]
fn profiles_cover_every_posed_part() {
    for kind in TopologyKind::ALL {
        let drive = DriveTopology::new(kind, 0.5);
        let profiles = drive.profiles().unwrap();
        let poses = drive.poses();
        let profiled: Vec<_> = profiles.keys().collect();
        let posed: Vec<_> = poses.keys().collect();
        assert_eq!(profiled, posed, "{kind}");
    }
}

#[test]
fn configs_round_trip_through_json() {
    let config: DriveConfig =
        serde_json::from_str(r#"{ "topology": "planetary", "sun_teeth": 12, "ring_teeth": 48 }"#)
            .unwrap();
    assert_eq!(config, DriveConfig::Planetary(PlanetaryConfig::new(12, 48)));
    let back: Real = match config {
        DriveConfig::Planetary(c) => c.module,
        _ => 0.0,
    };
    assert_relative_eq!(back, 0.5);
}
