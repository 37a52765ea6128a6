//! Anomaly injection shared by the numeric and letter generators.

use oddline_core::{AnomalyType, Line, RandomSource};

/// Build one line: ascending-by-one base from `start`, then the anomaly the
/// batch rotation assigns to `index`.
///
/// Draws one position per line, plus one more for `double`. `order` ignores
/// its draw so every line advances the stream the same way.
pub(crate) fn build_line<E>(
    start: i64,
    line_length: usize,
    index: usize,
    rng: &mut impl RandomSource,
    to_item: impl Fn(i64) -> E,
) -> Line<E> {
    let anomaly = AnomalyType::for_index(index);
    let mut ordinals: Vec<i64> = (0..line_length).map(|k| start + k as i64).collect();

    let drawn = rng.pick_index(line_length - 1);
    let position = match anomaly {
        AnomalyType::Missing => drawn,
        AnomalyType::Double => {
            let (low, high) = double_window(line_length);
            rng.pick_between(low, high)
        }
        AnomalyType::Order => 0,
    };
    inject(anomaly, &mut ordinals, position);

    Line {
        items: ordinals.into_iter().map(to_item).collect(),
        error_index: position,
        anomaly: Some(anomaly),
    }
}

/// Positions where a duplicate still leaves room for the `+2` that follows it.
fn double_window(line_length: usize) -> (usize, usize) {
    if line_length >= 4 {
        (1, line_length - 3)
    } else {
        (0, 0)
    }
}

fn inject(anomaly: AnomalyType, items: &mut [i64], position: usize) {
    match anomaly {
        AnomalyType::Missing => skip_after(items, position),
        AnomalyType::Double => repeat_at(items, position),
        AnomalyType::Order => swap_at(items, position),
    }
}

fn skip_after(items: &mut [i64], position: usize) {
    for item in &mut items[position + 1..] {
        *item += 1;
    }
}

fn repeat_at(items: &mut [i64], position: usize) {
    items[position + 1] = items[position];
}

fn swap_at(items: &mut [i64], position: usize) {
    items.swap(position, position + 1);
}
