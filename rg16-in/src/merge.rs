//! Merges contiguous same-channel trace blocks produced by `read_rg16` into
//! longer traces, mirroring the original's `_quick_merge`.
use rg16_core::{Rg16Error, Trace, UtcDateTime};

const SMALL_NUMBER: f64 = 0.000_001;

/// Merge `traces`, which must all share a single sampling rate. Traces are
/// grouped by `(id, starttime)` order: a run of traces with the same id
/// whose end-to-start gaps are within one sample spacing of each other
/// forms one output trace.
pub fn quick_merge(mut traces: Vec<Trace>) -> Result<Vec<Trace>, Rg16Error> {
    if traces.is_empty() {
        return Ok(traces);
    }
    let sampling_rate = traces[0].sampling_rate;
    if traces.iter().any(|t| t.sampling_rate != sampling_rate) {
        return Err(Rg16Error::HeterogeneousStreamForMerge);
    }
    let diff = 1.0 / sampling_rate as f64 + SMALL_NUMBER;

    traces.sort_by(|a, b| {
        a.id()
            .cmp(&b.id())
            .then_with(|| a.starttime.timestamp().partial_cmp(&b.starttime.timestamp()).unwrap())
    });

    let groups = trace_groups(&traces, diff);
    let nbr_groups = groups.last().copied().unwrap_or(0) + 1;

    let mut merged: Vec<Option<Trace>> = (0..nbr_groups).map(|_| None).collect();
    for (trace, group) in traces.into_iter().zip(groups.into_iter()) {
        match &mut merged[group as usize] {
            slot @ None => *slot = Some(trace),
            Some(existing) => {
                existing.samples.extend(trace.samples);
                existing.npts += trace.npts;
                existing.endtime = UtcDateTime::from_posix_seconds(
                    existing.starttime.timestamp() + (existing.npts.max(1) - 1) as f64
                        / existing.sampling_rate as f64,
                );
            }
        }
    }
    Ok(merged.into_iter().flatten().collect())
}

/// Group numbers: a new group starts whenever the id changes or the gap
/// between this trace's starttime and the previous trace's endtime exceeds
/// `diff`.
fn trace_groups(traces: &[Trace], diff: f64) -> Vec<u64> {
    let mut groups = Vec::with_capacity(traces.len());
    let mut group = 0u64;
    for i in 0..traces.len() {
        if i == 0 {
            groups.push(group);
            continue;
        }
        let same_id = traces[i].id() == traces[i - 1].id();
        let gap = (traces[i].starttime.timestamp() - traces[i - 1].endtime.timestamp()).abs();
        let contiguous = gap <= diff;
        if !(same_id && contiguous) {
            group += 1;
        }
        groups.push(group);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(id_suffix: &str, start: f64, npts: u64, rate: u32) -> Trace {
        Trace {
            network: "1".to_string(),
            station: "1".to_string(),
            location: "0".to_string(),
            channel: format!("GP{}", id_suffix),
            starttime: UtcDateTime::from_posix_seconds(start),
            endtime: UtcDateTime::from_posix_seconds(start + (npts.max(1) - 1) as f64 / rate as f64),
            sampling_rate: rate,
            npts,
            samples: vec![0.0; npts as usize],
            details: None,
        }
    }

    #[test]
    fn merges_contiguous_same_channel_traces() {
        let t1 = trace("7", 0.0, 1000, 1000);
        let t2 = trace("7", 1.0, 1000, 1000);
        let merged = quick_merge(vec![t1, t2]).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].npts, 2000);
    }

    #[test]
    fn does_not_merge_different_channels() {
        let t1 = trace("7", 0.0, 1000, 1000);
        let t2 = trace("8", 1.0, 1000, 1000);
        let merged = quick_merge(vec![t1, t2]).unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn does_not_merge_with_a_gap() {
        let t1 = trace("7", 0.0, 1000, 1000);
        let t2 = trace("7", 5.0, 1000, 1000);
        let merged = quick_merge(vec![t1, t2]).unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn rejects_heterogeneous_sampling_rates() {
        let t1 = trace("7", 0.0, 1000, 1000);
        let t2 = trace("7", 1.0, 1000, 2000);
        assert!(matches!(
            quick_merge(vec![t1, t2]),
            Err(Rg16Error::HeterogeneousStreamForMerge)
        ));
    }
}
