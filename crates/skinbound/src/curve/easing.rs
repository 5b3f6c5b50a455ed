//! Easing remaps of the segment parameter
//!
//! Each easing maps `s` in [0, 1] to a new parameter which is then used for
//! plain linear interpolation. Elastic, overshoot and bounce families leave
//! [0, 1] on purpose.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Easing curve family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EaseFamily {
    Quadratic,
    Cubic,
    Quartic,
    Quintic,
    Sine,
    Exponential,
    Circular,
    Elastic,
    Overshoot,
    Bounce,
}

/// Which end(s) of the segment the easing applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EaseMode {
    In,
    Out,
    InOut,
    OutIn,
}

/// A concrete easing function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Easing {
    pub family: EaseFamily,
    pub mode: EaseMode,
}

impl Easing {
    pub const fn new(family: EaseFamily, mode: EaseMode) -> Self {
        Self { family, mode }
    }

    /// Remap the segment parameter `t`
    pub fn apply(self, t: f32) -> f32 {
        use EaseMode::{In, InOut, Out, OutIn};

        match self.family {
            EaseFamily::Quadratic => match self.mode {
                In => t * t,
                Out => t * (2.0 - t),
                InOut => {
                    let t2 = t * 2.0;
                    if t2 < 1.0 {
                        0.5 * t2 * t2
                    } else {
                        let u = t2 - 1.0;
                        0.5 * (1.0 - u * (u - 2.0))
                    }
                }
                OutIn => {
                    if t < 0.5 {
                        2.0 * t * (1.0 - t)
                    } else {
                        1.0 + 2.0 * t * (t - 1.0)
                    }
                }
            },
            EaseFamily::Cubic => match self.mode {
                In => t * t * t,
                Out => {
                    let u = t - 1.0;
                    u * u * u + 1.0
                }
                InOut => {
                    let t2 = t * 2.0;
                    if t2 < 1.0 {
                        0.5 * t2 * t2 * t2
                    } else {
                        let u = t2 - 2.0;
                        0.5 * (u * u * u + 2.0)
                    }
                }
                OutIn => {
                    let u = 2.0 * t - 1.0;
                    0.5 * (u * u * u + 1.0)
                }
            },
            EaseFamily::Quartic => match self.mode {
                In => t.powi(4),
                Out => 1.0 - (t - 1.0).powi(4),
                InOut => {
                    let t2 = t * 2.0;
                    if t2 < 1.0 {
                        0.5 * t2.powi(4)
                    } else {
                        -0.5 * ((t2 - 2.0).powi(4) - 2.0)
                    }
                }
                OutIn => {
                    let u = 2.0 * t - 1.0;
                    if u < 0.0 {
                        0.5 * (1.0 - u.powi(4))
                    } else {
                        0.5 * (u.powi(4) + 1.0)
                    }
                }
            },
            EaseFamily::Quintic => match self.mode {
                In => t.powi(5),
                Out => (t - 1.0).powi(5) + 1.0,
                InOut => {
                    let t2 = t * 2.0;
                    if t2 < 1.0 {
                        0.5 * t2.powi(5)
                    } else {
                        0.5 * ((t2 - 2.0).powi(5) + 2.0)
                    }
                }
                OutIn => 0.5 * ((2.0 * t - 1.0).powi(5) + 1.0),
            },
            EaseFamily::Sine => match self.mode {
                In => 1.0 - (t * FRAC_PI_2).cos(),
                Out => (t * FRAC_PI_2).sin(),
                InOut => -0.5 * ((PI * t).cos() - 1.0),
                OutIn => {
                    if t < 0.5 {
                        0.5 * (PI * t).sin()
                    } else {
                        1.0 - 0.5 * (FRAC_PI_2 * (2.0 * t - 1.0)).cos()
                    }
                }
            },
            EaseFamily::Exponential => match self.mode {
                In if t != 0.0 => (10.0 * (t - 1.0)).exp(),
                Out if t != 1.0 => 1.0 - (-10.0 * t).exp(),
                InOut if t != 0.0 && t != 1.0 => {
                    if t < 0.5 {
                        0.5 * (10.0 * (2.0 * t - 1.0)).exp()
                    } else {
                        1.0 - 0.5 * (10.0 * (1.0 - 2.0 * t)).exp()
                    }
                }
                OutIn if t != 0.0 && t != 1.0 => {
                    if t < 0.5 {
                        0.5 - 0.5 * (-20.0 * t).exp()
                    } else {
                        0.5 * (20.0 * (t - 1.0)).exp() + 0.5
                    }
                }
                _ => t,
            },
            EaseFamily::Circular => match self.mode {
                In => 1.0 - (1.0 - t * t).sqrt(),
                Out => {
                    let u = t - 1.0;
                    (1.0 - u * u).sqrt()
                }
                InOut => {
                    let t2 = t * 2.0;
                    if t2 < 1.0 {
                        0.5 * (1.0 - (1.0 - t2 * t2).sqrt())
                    } else {
                        let u = t2 - 2.0;
                        0.5 * ((1.0 - u * u).sqrt() + 1.0)
                    }
                }
                OutIn => {
                    let u = 2.0 * t - 1.0;
                    if u < 0.0 {
                        0.5 * (1.0 - u * u).sqrt()
                    } else {
                        0.5 * (2.0 - (1.0 - u * u).sqrt())
                    }
                }
            },
            EaseFamily::Elastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                match self.mode {
                    In => {
                        let u = t - 1.0;
                        -((10.0 * u).exp() * ((u - 0.075) * TAU / 0.3).sin())
                    }
                    Out => (-10.0 * t).exp() * ((t - 0.075) * TAU / 0.3).sin() + 1.0,
                    InOut => {
                        let u = 2.0 * t - 1.0;
                        let wave = ((u - 0.1125) * TAU / 0.45).sin();
                        if u < 0.0 {
                            -0.5 * (10.0 * u).exp() * wave
                        } else {
                            0.5 * (-10.0 * u).exp() * wave + 1.0
                        }
                    }
                    OutIn => {
                        let t2 = t * 2.0;
                        let wave = ((t2 - 0.1125) * TAU / 0.45).sin();
                        if t2 < 1.0 {
                            0.5 * (-10.0 * t2).exp() * wave + 0.5
                        } else {
                            0.5 * (10.0 * (t2 - 2.0)).exp() * wave + 0.5
                        }
                    }
                }
            }
            EaseFamily::Overshoot => match self.mode {
                In => t * t * (2.70158 * t - 1.70158),
                Out => {
                    let u = t - 1.0;
                    u * u * (2.70158 * u + 1.70158) + 1.0
                }
                InOut => {
                    let t2 = t * 2.0;
                    if t2 < 1.0 {
                        0.5 * t2 * t2 * (3.594_909_5 * t2 - 2.594_909_5)
                    } else {
                        let u = t2 - 2.0;
                        0.5 * (u * u * (3.594_909_5 * u + 2.594_909_5) + 2.0)
                    }
                }
                OutIn => {
                    let u = 2.0 * t - 1.0;
                    if u < 0.0 {
                        0.5 * (u * u * (3.594_909_5 * u + 2.594_909_5) + 1.0)
                    } else {
                        0.5 * (u * u * (3.594_909_5 * u - 2.594_909_5) + 1.0)
                    }
                }
            },
            EaseFamily::Bounce => match self.mode {
                In => 1.0 - bounce_out(1.0 - t),
                Out => bounce_out(t),
                InOut => {
                    if t < 0.5 {
                        0.5 * (1.0 - bounce_out(1.0 - t * 2.0))
                    } else {
                        0.5 * bounce_out(t * 2.0 - 1.0) + 0.5
                    }
                }
                OutIn => bounce_out_in(t),
            },
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    if t < 0.363_636_37 {
        7.5625 * t * t
    } else if t < 0.727_272_7 {
        let u = t - 0.545_454_55;
        7.5625 * u * u + 0.75
    } else if t < 0.909_090_9 {
        let u = t - 0.818_181_8;
        7.5625 * u * u + 0.9375
    } else {
        let u = t - 0.954_545_45;
        7.5625 * u * u + 0.984_375
    }
}

fn bounce_out_in(t: f32) -> f32 {
    if t < 0.181_818_18 {
        15.125 * t * t
    } else if t < 0.363_636_36 {
        1.5 + (-8.25 + 15.125 * t) * t
    } else if t < 0.454_545_46 {
        3.0 + (-12.375 + 15.125 * t) * t
    } else if t < 0.5 {
        3.9375 + (-14.4375 + 15.125 * t) * t
    } else if t <= 0.545_454_55 {
        -3.625 + (15.8125 - 15.125 * t) * t
    } else if t <= 0.636_363_65 {
        -4.75 + (17.875 - 15.125 * t) * t
    } else if t <= 0.818_181_8 {
        -7.375 + (22.0 - 15.125 * t) * t
    } else {
        -14.125 + (30.25 - 15.125 * t) * t
    }
}
