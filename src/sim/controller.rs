use crate::drive::{
    DriveConfig, DriveTopology, PartLayouts, PartPoses, PartProfiles, PortMap, RatioSummary,
    TopologyKind,
};
use crate::errors::{ConfigError, PreferenceError};
use crate::float_types::{DEG_TO_RAD, Real};
use crate::i18n::{self, Language, PreferenceStore};
use crate::sim::clock::TickClock;
use crate::sim::settings::SimulationSettings;
use crate::sim::units::{TorqueUnit, parse_lenient};
use log::{debug, warn};

/// Owns the active drive and everything the UI reads from it.
///
/// Profiles, layouts and the ratio summary change only when the configuration
/// or topology does. Poses change every tick. Port values change with input
/// speed, torque, unit, configuration or topology.
#[derive(Clone, Debug)]
pub struct SimulationController {
    settings: SimulationSettings,
    drive: DriveTopology,
    clock: TickClock,
    /// Degrees per second.
    input_speed: Real,
    /// In `unit`.
    input_torque: Real,
    unit: TorqueUnit,
    language: Language,
    profiles: PartProfiles,
    layouts: PartLayouts,
    summary: RatioSummary,
    ports: PortMap,
    ticks: u64,
}

impl SimulationController {
    pub fn new(settings: SimulationSettings) -> Result<Self, ConfigError> {
        let drive = DriveTopology::new(settings.topology, settings.eccentricity);
        let profiles = drive.profiles()?;
        let layouts = drive.layouts()?;
        let mut controller = Self {
            clock: settings.clock(),
            input_speed: settings.input_speed,
            input_torque: settings.input_torque,
            unit: settings.unit,
            language: settings.language,
            summary: drive.ratio_summary(),
            ports: PortMap::new(),
            ticks: 0,
            profiles,
            layouts,
            drive,
            settings,
        };
        controller.refresh_ports();
        Ok(controller)
    }

    /// Like [`new`](Self::new), then restores the language saved in `store`.
    ///
    /// An unreadable store leaves the start-up language in place.
    pub fn with_preferences(
        settings: SimulationSettings,
        store: &impl PreferenceStore,
    ) -> Result<Self, ConfigError> {
        let mut controller = Self::new(settings)?;
        if let Err(err) = controller.load_language(store) {
            warn!("keeping {} language: {}", controller.language.code(), err);
        }
        Ok(controller)
    }

    pub const fn drive(&self) -> &DriveTopology {
        &self.drive
    }

    pub const fn kind(&self) -> TopologyKind {
        self.drive.kind()
    }

    pub fn config(&self) -> DriveConfig {
        self.drive.config()
    }

    /// Discards the active drive and starts `kind` from its default configuration
    /// with every angle at zero. Inputs go back to their start-up numbers, read in
    /// whatever unit is currently selected.
    pub fn switch_topology(&mut self, kind: TopologyKind) -> Result<(), ConfigError> {
        let drive = DriveTopology::new(kind, self.settings.eccentricity);
        let profiles = drive.profiles()?;
        let layouts = drive.layouts()?;
        debug!("switching drive from {} to {}", self.drive.kind(), kind);

        self.summary = drive.ratio_summary();
        self.drive = drive;
        self.profiles = profiles;
        self.layouts = layouts;
        self.input_speed = self.settings.input_speed;
        self.input_torque = self.settings.input_torque;
        self.ticks = 0;
        self.clock.restart();
        self.refresh_ports();
        Ok(())
    }

    /// Validates and applies a configuration edit.
    ///
    /// On error nothing changes: configuration, angles, profiles and ports all keep
    /// their previous values.
    pub fn apply_config(&mut self, config: DriveConfig) -> Result<(), ConfigError> {
        let mut next = self.drive.clone();
        if let Err(err) = next.apply_config(config) {
            warn!("rejected {} configuration: {}", config.kind(), err);
            return Err(err);
        }
        let profiles = next.profiles()?;
        let layouts = next.layouts()?;
        debug!("applied {config:?}");

        self.summary = next.ratio_summary();
        self.drive = next;
        self.profiles = profiles;
        self.layouts = layouts;
        self.refresh_ports();
        Ok(())
    }

    /// Advances one tick using the controller's clock.
    pub fn tick(&mut self) {
        let dt = self.clock.next_dt();
        self.tick_with(dt);
    }

    /// Advances by an explicit `dt` seconds.
    pub fn tick_with(&mut self, dt: Real) {
        self.drive.step(self.input_speed * DEG_TO_RAD, dt);
        self.ticks += 1;
    }

    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn input_angle(&self) -> Real {
        self.drive.input_angle()
    }

    pub const fn input_speed(&self) -> Real {
        self.input_speed
    }

    pub fn set_input_speed(&mut self, degrees_per_second: Real) {
        self.input_speed = degrees_per_second;
        self.refresh_ports();
    }

    /// Speed as typed by the user; malformed text counts as zero.
    pub fn set_input_speed_text(&mut self, text: &str) {
        self.set_input_speed(parse_lenient(text));
    }

    pub const fn input_torque(&self) -> Real {
        self.input_torque
    }

    pub fn set_input_torque(&mut self, torque: Real) {
        self.input_torque = torque;
        self.refresh_ports();
    }

    /// Torque as typed by the user; malformed text counts as zero.
    pub fn set_input_torque_text(&mut self, text: &str) {
        self.set_input_torque(parse_lenient(text));
    }

    pub const fn unit(&self) -> TorqueUnit {
        self.unit
    }

    /// Switches the display unit, rescaling every displayed torque.
    pub fn set_unit(&mut self, unit: TorqueUnit) {
        let factor = self.unit.conversion_to(unit);
        self.input_torque *= factor;
        self.unit = unit;
        self.refresh_ports();
    }

    pub const fn profiles(&self) -> &PartProfiles {
        &self.profiles
    }

    /// Every profile placed at its current pose.
    pub fn posed_profiles(&self) -> PartProfiles {
        let poses = self.poses();
        self.profiles
            .iter()
            .map(|(part, profile)| {
                let posed = poses.get(part).map_or_else(|| profile.clone(), |p| p.apply(profile));
                (*part, posed)
            })
            .collect()
    }

    pub const fn layouts(&self) -> &PartLayouts {
        &self.layouts
    }

    pub fn poses(&self) -> PartPoses {
        self.drive.poses()
    }

    /// Torque in the display unit and angular velocity in degrees per second.
    pub const fn port_values(&self) -> &PortMap {
        &self.ports
    }

    pub const fn ratio_summary(&self) -> &RatioSummary {
        &self.summary
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    /// Restores the persisted language, keeping the current one when none is stored.
    pub fn load_language(&mut self, store: &impl PreferenceStore) -> Result<(), PreferenceError> {
        if store.get(i18n::LANGUAGE_KEY)?.is_some() {
            self.language = Language::load(store)?;
        }
        Ok(())
    }

    /// Changes and persists the display language.
    pub fn set_language(
        &mut self,
        language: Language,
        store: &mut impl PreferenceStore,
    ) -> Result<(), PreferenceError> {
        language.save(store)?;
        self.language = language;
        Ok(())
    }

    /// Display text for `key` in the current language.
    pub fn label<'a>(&self, key: &'a str) -> &'a str {
        i18n::t(self.language, key)
    }

    /// Localized alert for a rejected configuration.
    pub fn error_message(&self, err: &ConfigError) -> &'static str {
        i18n::t(self.language, err.message_key())
    }

    fn refresh_ports(&mut self) {
        self.ports = self.drive.port_values(self.input_torque, self.input_speed);
    }
}
