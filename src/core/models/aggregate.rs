//! Merge per-provider results into one deterministically ordered list.

use std::cmp::Ordering;

use super::info::NormalizedModel;

/// Concatenate batches in the given order, then stable-sort by (provider name, model name).
pub fn aggregate<I>(batches: I) -> Vec<NormalizedModel>
where
    I: IntoIterator<Item = Vec<NormalizedModel>>,
{
    let mut all: Vec<NormalizedModel> = batches.into_iter().flatten().collect();
    all.sort_by(compare);
    all
}

fn compare(a: &NormalizedModel, b: &NormalizedModel) -> Ordering {
    a.provider
        .name()
        .cmp(b.provider.name())
        .then_with(|| a.name.cmp(&b.name))
}
