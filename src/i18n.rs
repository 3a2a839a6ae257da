//! Display text lookup and the persisted language preference.
//!
//! No engine logic depends on anything here; labels are only for the UI.

use crate::errors::PreferenceError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Preference key the display language is stored under.
pub const LANGUAGE_KEY: &str = "gearSimLang";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Korean => "ko",
            Self::English => "en",
        }
    }

    /// Reads the stored language. A missing or unknown value yields the default.
    pub fn load(store: &impl PreferenceStore) -> Result<Language, PreferenceError> {
        Ok(store
            .get(LANGUAGE_KEY)?
            .and_then(|code| code.parse().ok())
            .unwrap_or_default())
    }

    pub fn save(self, store: &mut impl PreferenceStore) -> Result<(), PreferenceError> {
        store.set(LANGUAGE_KEY, self.code())
    }

    const fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Korean => KO,
            Self::English => EN,
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ko" => Ok(Self::Korean),
            "en" => Ok(Self::English),
            other => Err(format!("unsupported language '{other}'")),
        }
    }
}

/// Translated text for `key`, or `key` itself when there is no entry.
pub fn t(language: Language, key: &str) -> &str {
    language
        .table()
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(key, |&(_, text)| text)
}

/// Minimal key/value persistence.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Preferences kept for the lifetime of the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One file per key inside `dir`.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        match fs::read_to_string(self.dir.join(key)) {
            Ok(value) => Ok(Some(value.trim().to_owned())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(key), value)?;
        Ok(())
    }
}

const EN: &[(&str, &str)] = &[
    ("simulationMode", "Simulation Mode"),
    ("unit", "Unit"),
    ("modePlanetary", "Planetary Gear"),
    ("modeHarmonic", "Harmonic Drive"),
    ("modeCycloidal", "Cycloidal Drive"),
    ("titlePlanetary", "Planetary Gear Calculator"),
    ("titleHarmonic", "Harmonic Drive Calculator"),
    ("titleCycloidal", "Cycloidal Drive Calculator"),
    ("sunGear", "Sun Gear"),
    ("planetGear", "Planet Gear"),
    ("ringGear", "Ring Gear"),
    ("carrier", "Carrier"),
    ("waveGen", "Wave Generator"),
    ("flexspline", "Flexspline (Output)"),
    ("circularSpline", "Circular Spline"),
    ("eccentric", "Eccentric Shaft"),
    ("cycloidDisc", "Cycloidal Disc"),
    ("pinWheel", "Pin Wheel"),
    ("sunTeeth", "Sun (S)"),
    ("ringTeeth", "Ring (R)"),
    ("planetTeeth", "Planet (P)"),
    ("flexTeeth", "Flexspline (F)"),
    ("circTeeth", "Circular (C)"),
    ("discLobes", "Lobes"),
    ("numPins", "Pins"),
    ("torque", "Torque"),
    ("speed", "Speed"),
    ("fixed", "Fixed"),
    ("gearRatio", "Gear Ratio:"),
    ("reductionRatio", "Reduction Ratio:"),
    ("alertInvalidTeeth", "Invalid teeth configuration."),
    (
        "alertInvalidFlex",
        "Flexspline teeth must be ≥50, Circular must be greater than Flexspline.",
    ),
    (
        "alertInvalidCycloidal",
        "Lobes must be ≥5, Pins must be greater than Lobes.",
    ),
    (
        "alertTopologyMismatch",
        "This configuration belongs to a different drive type.",
    ),
];

const KO: &[(&str, &str)] = &[
    ("simulationMode", "시뮬레이션 모드"),
    ("unit", "단위 (Unit)"),
    ("modePlanetary", "유성 기어"),
    ("modeHarmonic", "하모닉 드라이브"),
    ("modeCycloidal", "사이클로이드"),
    ("titlePlanetary", "유성 기어 계산기"),
    ("titleHarmonic", "하모닉 드라이브 계산기"),
    ("titleCycloidal", "사이클로이드 계산기"),
    ("sunGear", "선 기어 (Sun)"),
    ("planetGear", "유성 기어 (Planet)"),
    ("ringGear", "링 기어 (Ring)"),
    ("carrier", "캐리어 (Carrier)"),
    ("waveGen", "웨이브 제너레이터"),
    ("flexspline", "플렉스스플라인 (출력)"),
    ("circularSpline", "서큘러 스플라인"),
    ("eccentric", "입력축 (Eccentric)"),
    ("cycloidDisc", "사이클로이드 디스크"),
    ("pinWheel", "핀 휠 (Pin Wheel)"),
    ("sunTeeth", "선 기어 (S)"),
    ("ringTeeth", "링 기어 (R)"),
    ("planetTeeth", "유성 기어 (P)"),
    ("flexTeeth", "플렉스 (F)"),
    ("circTeeth", "서큘러 (C)"),
    ("discLobes", "로브 수"),
    ("numPins", "핀 개수"),
    ("torque", "토크"),
    ("speed", "속도"),
    ("fixed", "고정됨 (Fixed)"),
    ("gearRatio", "기어비:"),
    ("reductionRatio", "감속비:"),
    ("alertInvalidTeeth", "유효하지 않거나 조건을 만족하지 않는 잇수입니다."),
    (
        "alertInvalidFlex",
        "플렉스 잇수는 50 이상, 서큘러는 플렉스보다 커야 합니다.",
    ),
    (
        "alertInvalidCycloidal",
        "로브 수는 5 이상, 핀 개수는 로브 수보다 커야 합니다.",
    ),
    ("alertTopologyMismatch", "다른 드라이브 유형의 설정입니다."),
];
