use std::fmt;

/// A provider's self-reported fitness for a binding request.
///
/// Bands, lowest to highest:
///
/// | constant          | value | meaning                                     |
/// |-------------------|-------|---------------------------------------------|
/// | `NONE`            | 0     | cannot handle the request                   |
/// | `FALLBACK`        | 10    | generic fallback, e.g. a conventional event |
/// | `NATIVE`          | 50    | toolkit-native command support              |
/// | `EXPLICIT_EVENT`  | 100   | the caller named the target event           |
///
/// Providers may report values between bands to order themselves within one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Affinity(pub u32);

impl Affinity {
    pub const NONE: Affinity = Affinity(0);
    pub const FALLBACK: Affinity = Affinity(10);
    pub const NATIVE: Affinity = Affinity(50);
    pub const EXPLICIT_EVENT: Affinity = Affinity(100);

    pub fn is_capable(self) -> bool {
        self > Self::NONE
    }
}

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
