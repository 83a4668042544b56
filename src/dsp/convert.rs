//! Time and level conversions between host units and table units.

/*
From Musical Units to Samples
=============================

The host speaks in musical units (tempo in bpm, depth in dB, peak time as a
fraction of the cycle). The table speaks in samples and linear gain. Every
parameter update goes through the same small set of conversions.

Vocabulary
----------

  cycle         One full period of the modulation. The table holds exactly
                one cycle and the cursor loops over it.

  speed         Cycle rate in beats per minute. One cycle lasts one beat:
                  cycle_seconds = 60 / bpm

  depth (dB)    How far the envelope dips below unity gain, in decibels.
                The sign only selects the direction of the shape.

  depth         The same excursion as a signed linear amplitude delta:
                  depth = sign(dB) × (1 - 10^(-|dB| / 20))


Reference Points
----------------

    speed     cycle       samples @ 48kHz
    60 bpm    1.000 s     48000
    120 bpm   0.500 s     24000
    240 bpm   0.250 s     12000
    480 bpm   0.125 s      6000

    depth dB   linear delta   floor gain
     0 dB      0.000          1.000
    -6 dB      0.499          0.501
    -12 dB     0.749          0.251
    -20 dB     0.900          0.100


Rounding
--------

The table length rounds UP so a cycle never gets shorter than requested:

    length = ceil(cycle_seconds × sample_rate)

The breakpoint rounds to the NEAREST sample:

    peak_sample = round(peak_seconds × sample_rate)
*/

/// Cycle length in seconds for a tempo in beats per minute.
///
/// # Example
/// ```
/// use wavegain::dsp::convert::bpm_to_seconds;
/// assert!((bpm_to_seconds(240.0) - 0.25).abs() < 1e-6);
/// ```
#[inline]
pub fn bpm_to_seconds(bpm: f32) -> f32 {
    60.0 / bpm
}

/// Signed linear depth for a depth given in decibels.
///
/// The magnitude is the distance between unity gain and the floor gain.
///
/// # Example
/// ```
/// use wavegain::dsp::convert::db_to_depth;
/// assert!((db_to_depth(-6.0) + 0.4988).abs() < 1e-3);
/// assert_eq!(db_to_depth(0.0), 0.0);
/// ```
#[inline]
pub fn db_to_depth(db: f32) -> f32 {
    if db == 0.0 {
        return 0.0;
    }
    db.signum() * (1.0 - 10.0_f32.powf(-db.abs() / 20.0))
}

// f32 times such as 0.3 s land a hair above the exact sample count. Anything
// below the input's own f32 precision is representation noise, not a fraction.
const CEIL_TOLERANCE: f64 = f32::EPSILON as f64;

/// Number of table slots needed to hold `seconds` at `sample_rate`.
///
/// Always at least one slot.
#[inline]
pub fn table_length(seconds: f32, sample_rate: f32) -> usize {
    let samples = f64::from(seconds) * f64::from(sample_rate);
    ((samples * (1.0 - CEIL_TOLERANCE)).ceil() as usize).max(1)
}

/// Nearest sample index for a time offset in seconds.
#[inline]
pub fn seconds_to_sample(seconds: f32, sample_rate: f32) -> usize {
    (f64::from(seconds) * f64::from(sample_rate)).round().max(0.0) as usize
}
