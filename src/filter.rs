use std::fmt;

/// Optional min/max bounds on source image dimensions.
///
/// A bound of zero counts as unset, so it never triggers a skip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeBounds {
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

/// First bound an image failed, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeViolation {
    NarrowerThan(u32),
    ShorterThan(u32),
    WiderThan(u32),
    TallerThan(u32),
}

impl fmt::Display for SizeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeViolation::NarrowerThan(v) => write!(f, "width below minimum {}", v),
            SizeViolation::ShorterThan(v) => write!(f, "height below minimum {}", v),
            SizeViolation::WiderThan(v) => write!(f, "width above maximum {}", v),
            SizeViolation::TallerThan(v) => write!(f, "height above maximum {}", v),
        }
    }
}

impl SizeBounds {
    pub fn new(
        min_width: Option<u32>,
        min_height: Option<u32>,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> Self {
        let set = |b: Option<u32>| b.filter(|&v| v > 0);
        Self {
            min_width: set(min_width),
            min_height: set(min_height),
            max_width: set(max_width),
            max_height: set(max_height),
        }
    }

    /// Checks min width, min height, max width, max height in that order and
    /// stops at the first violation.
    pub fn check(&self, width: u32, height: u32) -> Option<SizeViolation> {
        if let Some(min) = self.min_width.filter(|&min| width < min) {
            return Some(SizeViolation::NarrowerThan(min));
        }
        if let Some(min) = self.min_height.filter(|&min| height < min) {
            return Some(SizeViolation::ShorterThan(min));
        }
        if let Some(max) = self.max_width.filter(|&max| width > max) {
            return Some(SizeViolation::WiderThan(max));
        }
        if let Some(max) = self.max_height.filter(|&max| height > max) {
            return Some(SizeViolation::TallerThan(max));
        }
        None
    }

    pub fn should_skip(&self, width: u32, height: u32) -> bool {
        self.check(width, height).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_bounds_never_skip() {
        let bounds = SizeBounds::default();
        assert!(!bounds.should_skip(1, 1));
        assert!(!bounds.should_skip(100_000, 100_000));
    }

    #[test]
    fn test_zero_bounds_are_unset() {
        let bounds = SizeBounds::new(Some(0), Some(0), Some(0), Some(0));
        assert_eq!(bounds, SizeBounds::default());
        assert!(!bounds.should_skip(10, 10));
    }

    #[test]
    fn test_each_bound() {
        let bounds = SizeBounds::new(Some(20), Some(30), Some(200), Some(300));

        assert_eq!(bounds.check(19, 100), Some(SizeViolation::NarrowerThan(20)));
        assert_eq!(bounds.check(100, 29), Some(SizeViolation::ShorterThan(30)));
        assert_eq!(bounds.check(201, 100), Some(SizeViolation::WiderThan(200)));
        assert_eq!(bounds.check(100, 301), Some(SizeViolation::TallerThan(300)));
        assert_eq!(bounds.check(20, 30), None);
        assert_eq!(bounds.check(200, 300), None);
    }

    #[test]
    fn test_first_violation_wins() {
        let bounds = SizeBounds::new(Some(20), Some(20), None, None);
        assert_eq!(bounds.check(1, 1), Some(SizeViolation::NarrowerThan(20)));
    }

    #[test]
    fn test_violation_display() {
        assert_eq!(
            SizeViolation::WiderThan(10).to_string(),
            "width above maximum 10"
        );
    }
}
