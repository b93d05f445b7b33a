//! Animated statistic counters such as `"10,000k+"` or `"98%"`.
//!
//! A counter string is parsed into a numeric target plus its display
//! conventions, animated from zero with an ease-out-quartic curve, and
//! re-rendered with the same conventions at every step.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// A parsed counter: numeric target plus how to render it.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterValue {
    target: f64,
    grouped: bool,
    kilo: bool,
    percent: bool,
    plus: bool,
    decimals: usize,
}

impl CounterValue {
    /// Parse `digits[,digits]*[.digits][k][%|+]`. Thousands separators are
    /// dropped, a `k` multiplies by 1000, `%` and `+` are display-only.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        let grouped = raw.contains(',');
        let kilo = lower.contains('k');
        let percent = raw.contains('%');
        let plus = raw.contains('+');

        let digits: String = lower
            .chars()
            .filter(|c| !matches!(c, ',' | 'k' | '%' | '+'))
            .collect();
        let digits = digits.trim();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return None;
        }
        let base: f64 = digits.parse().ok()?;
        let decimals = digits.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0);

        Some(Self {
            target: if kilo { base * 1000.0 } else { base },
            grouped,
            kilo,
            percent,
            plus,
            decimals,
        })
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Render `value` with the original separators and suffixes.
    pub fn format(&self, value: f64) -> String {
        let shown = if self.kilo { value / 1000.0 } else { value };
        let mut number = format!("{:.*}", self.decimals, shown);
        if self.grouped {
            number = group_thousands(&number);
        }
        if self.kilo {
            number.push('k');
        }
        if self.percent {
            number.push('%');
        }
        if self.plus {
            number.push('+');
        }
        number
    }
}

fn group_thousands(number: &str) -> String {
    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (number, None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn ease_out_quart(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(4)
}

/// Monotonic time source, injected so animations can be stepped in tests.
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's own epoch.
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterPhase {
    Idle,
    Animating { started: Duration },
    Settled,
}

/// `Idle -> Animating -> Settled`, with any visibility exit going back to
/// `Idle` so the next entry restarts from zero.
#[derive(Debug)]
pub struct CounterAnimation<C: Clock> {
    value: CounterValue,
    duration: Duration,
    clock: C,
    phase: CounterPhase,
}

impl<C: Clock> CounterAnimation<C> {
    pub fn new(value: CounterValue, clock: C) -> Self {
        Self {
            value,
            duration: DEFAULT_DURATION,
            clock,
            phase: CounterPhase::Idle,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    /// Feed a visibility observation. Repeated "visible" signals while
    /// animating or settled are ignored.
    pub fn on_visibility(&mut self, visible: bool) {
        self.phase = match (self.phase, visible) {
            (CounterPhase::Idle, true) => CounterPhase::Animating {
                started: self.clock.now(),
            },
            (phase, true) => phase,
            (_, false) => CounterPhase::Idle,
        };
    }

    /// Advance the state machine to the current clock time.
    pub fn tick(&mut self) -> f64 {
        if let CounterPhase::Animating { started } = self.phase {
            if self.progress(started) >= 1.0 {
                self.phase = CounterPhase::Settled;
            }
        }
        self.current()
    }

    pub fn current(&self) -> f64 {
        match self.phase {
            CounterPhase::Idle => 0.0,
            CounterPhase::Settled => self.value.target(),
            CounterPhase::Animating { started } => {
                let progress = self.progress(started);
                if progress >= 1.0 {
                    self.value.target()
                } else {
                    (self.value.target() * ease_out_quart(progress)).floor()
                }
            }
        }
    }

    pub fn display(&self) -> String {
        self.value.format(self.current())
    }

    fn progress(&self, started: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = self.clock.now().saturating_sub(started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kilo_with_separators() {
        let v = CounterValue::parse("10,000k+").unwrap();
        assert_eq!(v.target(), 10_000_000.0);
        assert_eq!(v.format(v.target()), "10,000k+");
    }

    #[test]
    fn round_trip_supported_grammar() {
        for raw in ["98%", "250+", "100+", "1,234", "12,345,678+", "5k", "2,500k%", "7", "4.5k+"] {
            let v = CounterValue::parse(raw).unwrap();
            assert_eq!(v.format(v.target()), raw, "round trip of {raw}");
        }
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(CounterValue::parse(""), None);
        assert_eq!(CounterValue::parse("lots"), None);
        assert_eq!(CounterValue::parse("k+"), None);
    }

    #[test]
    fn easing_curve() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-12);
        assert_eq!(ease_out_quart(3.0), 1.0);
    }

    #[test]
    fn animation_runs_to_target() {
        let clock = Arc::new(ManualClock::new());
        let value = CounterValue::parse("10,000k+").unwrap();
        let mut anim = CounterAnimation::new(value, clock.clone());

        assert_eq!(anim.display(), "0k+");
        anim.on_visibility(true);
        assert!(matches!(anim.phase(), CounterPhase::Animating { .. }));

        clock.advance(Duration::from_millis(1000));
        let halfway = anim.tick();
        assert_eq!(halfway, (10_000_000.0 * 0.9375_f64).floor());
        assert_eq!(anim.display(), "9,375k+");

        clock.advance(Duration::from_millis(1000));
        anim.tick();
        assert_eq!(anim.phase(), CounterPhase::Settled);
        assert_eq!(anim.display(), "10,000k+");
    }

    #[test]
    fn re_entering_view_restarts_from_zero() {
        let clock = Arc::new(ManualClock::new());
        let mut anim = CounterAnimation::new(CounterValue::parse("98%").unwrap(), clock.clone());
        anim.on_visibility(true);
        clock.advance(Duration::from_secs(5));
        anim.tick();
        assert_eq!(anim.display(), "98%");

        anim.on_visibility(false);
        assert_eq!(anim.phase(), CounterPhase::Idle);
        assert_eq!(anim.display(), "0%");

        anim.on_visibility(true);
        assert_eq!(anim.tick(), 0.0);
        clock.advance(Duration::from_millis(500));
        let partial = anim.tick();
        assert!(partial > 0.0 && partial < 98.0);
    }

    #[test]
    fn repeated_visible_signal_is_idempotent() {
        let clock = Arc::new(ManualClock::new());
        let mut anim = CounterAnimation::new(CounterValue::parse("250+").unwrap(), clock.clone());
        anim.on_visibility(true);
        clock.advance(Duration::from_millis(1500));
        let before = anim.tick();
        anim.on_visibility(true);
        assert_eq!(anim.tick(), before);
    }
}
