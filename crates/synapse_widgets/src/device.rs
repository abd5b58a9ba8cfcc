//! Device capability heuristics
//!
//! Detection is best effort. Every field of [`DeviceCapabilities`] is
//! optional, missing values fall back to conservative defaults, and a probe
//! that fails outright yields [`QualityTier::Medium`] with a warning.
//!
//! With the `gpu` feature, [`NativeProbe`] asks wgpu for an adapter to learn
//! whether anything can render. Without it, GPU availability is unknown.

use regex::Regex;
use std::num::NonZeroUsize;
use std::sync::OnceLock;
use synapse_core::{QualityTier, Result, SynapseError};
use sysinfo::System;

/// Assumed when the core count is unknown
const DEFAULT_CORES: usize = 4;

/// Assumed when the memory size is unknown
const DEFAULT_MEMORY_GB: f64 = 4.0;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

static MOBILE_UA: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
static TABLET_UA: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();

fn compiled(
    cell: &'static OnceLock<std::result::Result<Regex, regex::Error>>,
    pattern: &str,
) -> Result<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern))
        .as_ref()
        .map_err(|e| SynapseError::Probe(format!("user agent pattern: {}", e)))
}

fn mobile_pattern() -> Result<&'static Regex> {
    compiled(
        &MOBILE_UA,
        r"(?i)iphone|ipod|android.*mobile|blackberry|iemobile|opera mini|windows phone|webos",
    )
}

fn tablet_pattern() -> Result<&'static Regex> {
    compiled(&TABLET_UA, r"(?i)ipad|tablet|kindle|silk|playbook|android")
}

/// Broad device class inferred from the user agent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

/// Classify a user agent string
///
/// Android user agents without the `Mobile` token are tablets.
pub fn classify_user_agent(user_agent: &str) -> Result<DeviceClass> {
    if mobile_pattern()?.is_match(user_agent) {
        Ok(DeviceClass::Mobile)
    } else if tablet_pattern()?.is_match(user_agent) {
        Ok(DeviceClass::Tablet)
    } else {
        Ok(DeviceClass::Desktop)
    }
}

/// What a probe could find out about the device
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceCapabilities {
    pub cpu_cores: Option<usize>,
    pub memory_gb: Option<f64>,
    pub user_agent: Option<String>,
    /// Whether a GPU rendering context could be created
    pub gpu_available: Option<bool>,
}

impl DeviceCapabilities {
    pub fn device_class(&self) -> Result<DeviceClass> {
        match self.user_agent.as_deref() {
            Some(ua) => classify_user_agent(ua),
            None => Ok(DeviceClass::Desktop),
        }
    }

    /// Quality tier these capabilities can sustain
    pub fn recommended_tier(&self) -> Result<QualityTier> {
        if self.gpu_available == Some(false) {
            return Ok(QualityTier::Low);
        }
        let cores = self.cpu_cores.unwrap_or(DEFAULT_CORES);
        let memory_gb = self.memory_gb.unwrap_or(DEFAULT_MEMORY_GB);

        let tier = match self.device_class()? {
            DeviceClass::Mobile if cores <= 4 || memory_gb < 4.0 => QualityTier::Low,
            DeviceClass::Mobile | DeviceClass::Tablet => QualityTier::Medium,
            DeviceClass::Desktop if cores >= 8 && memory_gb >= 8.0 => QualityTier::High,
            DeviceClass::Desktop if cores <= 2 || memory_gb <= 2.0 => QualityTier::Low,
            DeviceClass::Desktop => QualityTier::Medium,
        };
        Ok(tier)
    }
}

/// Source of device capabilities
pub trait DeviceProbe: Send + Sync {
    fn probe(&self) -> Result<DeviceCapabilities>;
}

/// Reports whether a GPU adapter can be acquired; `None` when unknown
pub type GpuCheck = fn() -> Result<Option<bool>>;

/// Request any wgpu adapter, without a surface
#[cfg(feature = "gpu")]
pub fn detect_gpu_adapter() -> Result<Option<bool>> {
    let request = || {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .map(|adapter| adapter.get_info())
    };
    let info = std::panic::catch_unwind(request)
        .map_err(|_| SynapseError::Probe("GPU adapter request panicked".into()))?;
    match &info {
        Some(info) => tracing::debug!("device: GPU adapter {} ({:?})", info.name, info.backend),
        None => tracing::debug!("device: no GPU adapter"),
    }
    Ok(Some(info.is_some()))
}

/// GPU support is compiled out; availability stays unknown
#[cfg(not(feature = "gpu"))]
pub fn detect_gpu_adapter() -> Result<Option<bool>> {
    Ok(None)
}

/// Probe of the machine the process runs on
#[derive(Clone, Debug)]
pub struct NativeProbe {
    user_agent: Option<String>,
    gpu_check: GpuCheck,
}

impl Default for NativeProbe {
    fn default() -> Self {
        Self {
            user_agent: None,
            gpu_check: detect_gpu_adapter,
        }
    }
}

impl NativeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the GPU availability check
    pub fn with_gpu_check(mut self, check: GpuCheck) -> Self {
        self.gpu_check = check;
        self
    }

    /// Classify with a host-supplied user agent (e.g. from an embedding webview)
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

impl DeviceProbe for NativeProbe {
    fn probe(&self) -> Result<DeviceCapabilities> {
        let cpu_cores = std::thread::available_parallelism()
            .ok()
            .map(NonZeroUsize::get);

        let mut sys = System::new();
        sys.refresh_memory();
        let total = sys.total_memory();
        let memory_gb = (total > 0).then(|| total as f64 / BYTES_PER_GB);

        Ok(DeviceCapabilities {
            cpu_cores,
            memory_gb,
            user_agent: self.user_agent.clone(),
            gpu_available: (self.gpu_check)()?,
        })
    }
}

/// Probe returning fixed capabilities, for hosts that detect on their own
#[derive(Clone, Debug, Default)]
pub struct StaticProbe(pub DeviceCapabilities);

impl DeviceProbe for StaticProbe {
    fn probe(&self) -> Result<DeviceCapabilities> {
        Ok(self.0.clone())
    }
}

/// Recommend a quality tier, falling back to medium on any failure
pub fn recommend_quality(probe: &dyn DeviceProbe) -> QualityTier {
    match probe.probe().and_then(|caps| caps.recommended_tier()) {
        Ok(tier) => {
            tracing::debug!("device: recommended quality {}", tier);
            tier
        }
        Err(error) => {
            tracing::warn!("device: capability detection failed, using medium: {}", error);
            QualityTier::Medium
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
    const IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
    const ANDROID_PHONE: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/120.0 Mobile Safari/537.36";
    const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 14; SM-X710) Chrome/120.0 Safari/537.36";
    const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/121.0";

    struct FailingProbe;

    impl DeviceProbe for FailingProbe {
        fn probe(&self) -> Result<DeviceCapabilities> {
            Err(SynapseError::Probe("no rendering context".into()))
        }
    }

    fn caps(cores: usize, memory_gb: f64, ua: &str) -> DeviceCapabilities {
        DeviceCapabilities {
            cpu_cores: Some(cores),
            memory_gb: Some(memory_gb),
            user_agent: Some(ua.to_string()),
            gpu_available: Some(true),
        }
    }

    #[test]
    fn test_classify_user_agents() {
        assert_eq!(classify_user_agent(IPHONE).unwrap(), DeviceClass::Mobile);
        assert_eq!(classify_user_agent(ANDROID_PHONE).unwrap(), DeviceClass::Mobile);
        assert_eq!(classify_user_agent(IPAD).unwrap(), DeviceClass::Tablet);
        assert_eq!(classify_user_agent(ANDROID_TABLET).unwrap(), DeviceClass::Tablet);
        assert_eq!(classify_user_agent(DESKTOP).unwrap(), DeviceClass::Desktop);
    }

    #[test]
    fn test_recommended_tiers() {
        assert_eq!(caps(16, 32.0, DESKTOP).recommended_tier().unwrap(), QualityTier::High);
        assert_eq!(caps(4, 8.0, DESKTOP).recommended_tier().unwrap(), QualityTier::Medium);
        assert_eq!(caps(2, 8.0, DESKTOP).recommended_tier().unwrap(), QualityTier::Low);
        assert_eq!(caps(8, 6.0, IPHONE).recommended_tier().unwrap(), QualityTier::Medium);
        assert_eq!(caps(4, 6.0, IPHONE).recommended_tier().unwrap(), QualityTier::Low);
        assert_eq!(caps(8, 8.0, IPAD).recommended_tier().unwrap(), QualityTier::Medium);

        let mut no_gpu = caps(16, 32.0, DESKTOP);
        no_gpu.gpu_available = Some(false);
        assert_eq!(no_gpu.recommended_tier().unwrap(), QualityTier::Low);
    }

    #[test]
    fn test_unknown_values_use_defaults() {
        let unknown = DeviceCapabilities::default();
        assert_eq!(unknown.device_class().unwrap(), DeviceClass::Desktop);
        assert_eq!(unknown.recommended_tier().unwrap(), QualityTier::Medium);
    }

    #[test]
    fn test_failed_probe_falls_back_to_medium() {
        assert_eq!(recommend_quality(&FailingProbe), QualityTier::Medium);
    }

    #[test]
    fn test_static_probe() {
        let probe = StaticProbe(caps(12, 16.0, DESKTOP));
        assert_eq!(recommend_quality(&probe), QualityTier::High);
    }

    #[test]
    fn test_native_probe_reports_cores() {
        let caps = NativeProbe::new()
            .with_user_agent(DESKTOP)
            .with_gpu_check(|| Ok(Some(true)))
            .probe()
            .unwrap();
        assert!(caps.cpu_cores.unwrap_or(1) >= 1);
        assert_eq!(caps.user_agent.as_deref(), Some(DESKTOP));
        assert_eq!(caps.gpu_available, Some(true));
    }

    #[test]
    fn test_missing_gpu_forces_low_tier() {
        let probe = NativeProbe::new().with_gpu_check(|| Ok(Some(false)));
        assert_eq!(probe.probe().unwrap().gpu_available, Some(false));
        assert_eq!(recommend_quality(&probe), QualityTier::Low);
    }

    #[test]
    fn test_failed_gpu_check_falls_back_to_medium() {
        let probe = NativeProbe::new()
            .with_gpu_check(|| Err(SynapseError::Probe("adapter request failed".into())));
        assert!(probe.probe().is_err());
        assert_eq!(recommend_quality(&probe), QualityTier::Medium);
    }

    #[test]
    fn test_unknown_gpu_keeps_heuristics() {
        let probe = NativeProbe::new()
            .with_user_agent(IPAD)
            .with_gpu_check(|| Ok(None));
        assert_eq!(probe.probe().unwrap().gpu_available, None);
        assert_eq!(recommend_quality(&probe), QualityTier::Medium);
    }
}
