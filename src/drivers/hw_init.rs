//! One-shot ADC initialisation and calibrated conversions.
//!
//! Configures ADC1 in oneshot mode for the TDS probe channel, plus a
//! curve-fitting calibration scheme that turns raw counts into
//! millivolts, using raw ESP-IDF sys calls.  Called once from `main()`
//! before the first cycle.  GPIO and I²C are owned through `esp-idf-hal`
//! drivers in `main` instead.
//!
//! The TDS curve is calibrated for a 5 V, 10-bit converter, so readings
//! leave this module on that scale:
//!
//! ```text
//!  raw12 ──cali──▶ mV ──× 1024 / 5000──▶ TDS counts [0, 1023]
//! ```
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot + calibration APIs.
//! On host/test: reads millivolts from static `AtomicU16`s for injection.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    AdcChannelConfigFailed(i32),
    AdcCalibrationFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::AdcChannelConfigFailed(rc) => write!(f, "ADC1 channel config failed (rc={})", rc),
            Self::AdcCalibrationFailed(rc) => write!(f, "ADC1 calibration failed (rc={})", rc),
        }
    }
}

/// Reference voltage of the converter the TDS curve was fitted on (mV).
pub const TDS_VREF_MV: u32 = 5000;
/// Count range of that converter (10-bit).
pub const TDS_ADC_COUNTS: u32 = 1024;

// ── ADC (oneshot + calibration) ───────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
static mut ADC1_CALI: adc_cali_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the first monitor cycle.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handles() -> (adc_oneshot_unit_handle_t, adc_cali_handle_t) {
    unsafe { (ADC1_HANDLE, ADC1_CALI) }
}

/// Bring up ADC1, configure `channel` (12 dB attenuation, 12-bit) and
/// create its millivolt calibration.
#[cfg(target_os = "espidf")]
pub fn init_adc(channel: u32) -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    // SAFETY: handle initialised just above; single-threaded boot path.
    let ret = unsafe { adc_oneshot_config_channel(ADC1_HANDLE, channel, &chan_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcChannelConfigFailed(ret));
    }

    let cali_cfg = adc_cali_curve_fitting_config_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        chan: channel,
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    // SAFETY: ADC1_CALI is only written here, once at boot.
    let ret = unsafe { adc_cali_create_scheme_curve_fitting(&cali_cfg, &raw mut ADC1_CALI) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcCalibrationFailed(ret));
    }

    info!("hw_init: ADC1 configured (CH{}=TDS, curve-fitting cali)", channel);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_adc(channel: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ADC1 CH{} init skipped", channel);
    Ok(())
}

/// Calibrated pin voltage in millivolts.  A failed read yields 0.
#[cfg(target_os = "espidf")]
pub fn adc1_read_mv(channel: u32) -> u16 {
    // SAFETY: adc1_handles() contract; single-threaded main-loop access only.
    let (unit, cali) = unsafe { adc1_handles() };

    let mut raw: i32 = 0;
    // SAFETY: see above.
    let ret = unsafe { adc_oneshot_read(unit, channel, &mut raw) };
    if ret != ESP_OK as i32 {
        log::warn!("ADC1 CH{} read failed (rc={})", channel, ret);
        return 0;
    }

    let mut mv: i32 = 0;
    // SAFETY: see above.
    let ret = unsafe { adc_cali_raw_to_voltage(cali, raw, &mut mv) };
    if ret != ESP_OK as i32 {
        log::warn!("ADC1 CH{} calibration failed (rc={})", channel, ret);
        return 0;
    }
    mv.clamp(0, i32::from(u16::MAX)) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read_mv(channel: u32) -> u16 {
    use core::sync::atomic::Ordering;

    SIM_ADC1_MV
        .get(channel as usize)
        .map_or(0, |slot| slot.load(Ordering::Relaxed))
}

/// The count a 5 V / 10-bit converter would report for the voltage on
/// `channel`; this is what the TDS calibration expects.
pub fn adc1_read_tds_counts(channel: u32) -> u16 {
    mv_to_tds_counts(adc1_read_mv(channel))
}

/// Millivolts → counts of a [`TDS_VREF_MV`] / [`TDS_ADC_COUNTS`] converter,
/// truncating like a real ADC and saturating at full scale.
pub const fn mv_to_tds_counts(mv: u16) -> u16 {
    let counts = mv as u32 * TDS_ADC_COUNTS / TDS_VREF_MV;
    if counts >= TDS_ADC_COUNTS {
        (TDS_ADC_COUNTS - 1) as u16
    } else {
        counts as u16
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_ADC1_MV: [core::sync::atomic::AtomicU16; 10] =
    [const { core::sync::atomic::AtomicU16::new(0) }; 10];

/// Inject the pin voltage (mV) the next `adc1_read_mv(channel)` returns.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc1_mv(channel: u32, mv: u16) {
    if let Some(slot) = SIM_ADC1_MV.get(channel as usize) {
        slot.store(mv, core::sync::atomic::Ordering::Relaxed);
    }
}
