use super::error::AnalysisError;
use super::region::{Region, classify};
use super::torsion::AngleSample;

/// An angle pair together with the region it falls in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedSample {
    pub sample: AngleSample,
    pub region: Region,
}

impl From<AngleSample> for ClassifiedSample {
    fn from(sample: AngleSample) -> Self {
        Self {
            sample,
            region: classify(sample.phi, sample.psi),
        }
    }
}

pub fn classify_samples(samples: &[AngleSample]) -> Vec<ClassifiedSample> {
    samples.iter().copied().map(ClassifiedSample::from).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionShare {
    pub region: Region,
    pub count: usize,
    pub percentage: f64,
}

impl RegionShare {
    pub fn formatted_percentage(&self) -> String {
        format_percentage(self.percentage)
    }
}

/// Per-region occurrence counts and shares over one sample set.
///
/// Only observed regions have an entry. Entries are ordered by descending
/// count, and regions with equal counts keep the order in which they were
/// first observed.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSummary {
    total: usize,
    entries: Vec<RegionShare>,
}

impl RegionSummary {
    pub fn from_classified(samples: &[ClassifiedSample]) -> Result<Self, AnalysisError> {
        Self::from_regions(samples.iter().map(|s| s.region))
    }

    pub fn from_regions(regions: impl IntoIterator<Item = Region>) -> Result<Self, AnalysisError> {
        let mut counts: Vec<(Region, usize)> = Vec::with_capacity(Region::ALL.len());
        let mut total = 0usize;
        for region in regions {
            total += 1;
            match counts.iter_mut().find(|(r, _)| *r == region) {
                Some((_, count)) => *count += 1,
                None => counts.push((region, 1)),
            }
        }

        if total == 0 {
            return Err(AnalysisError::NoSamples);
        }

        // Stable sort keeps first-observed order among equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let entries = counts
            .into_iter()
            .map(|(region, count)| RegionShare {
                region,
                count,
                percentage: count as f64 / total as f64 * 100.0,
            })
            .collect();

        Ok(Self { total, entries })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn entries(&self) -> &[RegionShare] {
        &self.entries
    }

    pub fn get(&self, region: Region) -> Option<&RegionShare> {
        self.entries.iter().find(|e| e.region == region)
    }

    /// Observed regions in palette order rather than count order.
    pub fn in_region_order(&self) -> impl Iterator<Item = &RegionShare> {
        Region::ALL.into_iter().filter_map(|region| self.get(region))
    }
}

/// Formats a percentage with two decimals and a trailing `%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(pairs: &[(f64, f64)]) -> Vec<ClassifiedSample> {
        let raw: Vec<AngleSample> = pairs.iter().map(|&(phi, psi)| AngleSample::new(phi, psi)).collect();
        classify_samples(&raw)
    }

    #[test]
    fn classify_samples_preserves_order() {
        let classified = samples(&[(0.0, 0.0), (-90.0, 100.0), (170.0, 170.0)]);
        let regions: Vec<Region> = classified.iter().map(|c| c.region).collect();
        assert_eq!(regions, vec![Region::Favorable, Region::MostFavorable, Region::Allowed]);
        assert_eq!(classified[1].sample, AngleSample::new(-90.0, 100.0));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(RegionSummary::from_classified(&[]), Err(AnalysisError::NoSamples));
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let classified = samples(&[
            (0.0, 0.0),
            (-90.0, 100.0),
            (170.0, 170.0),
            (-90.0, 120.0),
            (-60.0, -40.0),
            (-160.0, -50.0),
            (60.0, 150.0),
        ]);
        let summary = RegionSummary::from_classified(&classified).unwrap();
        let sum: f64 = summary.entries().iter().map(|e| e.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(summary.total(), 7);
        assert_eq!(summary.entries().iter().map(|e| e.count).sum::<usize>(), 7);
    }

    #[test]
    fn entries_ordered_by_count_then_first_seen() {
        let summary = RegionSummary::from_regions([
            Region::Allowed,
            Region::Favorable,
            Region::MostFavorable,
            Region::Favorable,
            Region::MostFavorable,
        ])
        .unwrap();
        let order: Vec<Region> = summary.entries().iter().map(|e| e.region).collect();
        assert_eq!(order, vec![Region::Favorable, Region::MostFavorable, Region::Allowed]);

        let palette_order: Vec<Region> = summary.in_region_order().map(|e| e.region).collect();
        assert_eq!(palette_order, vec![Region::MostFavorable, Region::Favorable, Region::Allowed]);
    }

    #[test]
    fn unobserved_regions_are_omitted() {
        let summary = RegionSummary::from_regions([Region::Favorable; 3]).unwrap();
        assert_eq!(summary.entries().len(), 1);
        assert!(summary.get(Region::Disallowed).is_none());
        assert_eq!(summary.entries()[0].formatted_percentage(), "100.00%");
    }

    #[test]
    fn percentage_formatting_rounds_to_two_decimals() {
        assert_eq!(format_percentage(100.0 / 3.0), "33.33%");
        assert_eq!(format_percentage(200.0 / 3.0), "66.67%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }
}
