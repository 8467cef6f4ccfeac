use crate::aggregator::Aggregator;

/// Folds the per-worker states into one global state.
///
/// Sums and minimums commute, so the result does not depend on the order of `parts`; only
/// the global id numbering does, and nothing downstream reads it.
pub fn merge<I>(parts: I) -> Aggregator
where
    I: IntoIterator<Item = Aggregator>,
{
    let mut global = Aggregator::new();
    for part in parts {
        global.absorb(&part);
    }
    global
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(rows: &[(&str, &str, u64)]) -> Aggregator {
        let mut agg = Aggregator::new();
        for (city, product, price) in rows {
            agg.record(city.as_bytes(), product.as_bytes(), *price);
        }
        agg
    }

    #[test]
    fn merge_is_order_independent() {
        let a = part(&[("Lima", "Rice", 120), ("Quito", "Rice", 90)]);
        let b = part(&[("Quito", "Corn", 40), ("Lima", "Rice", 110)]);
        let c = part(&[]);

        let ab = merge([a.clone(), b.clone(), c.clone()]);
        let ba = merge([c, b, a]);

        for g in [&ab, &ba] {
            assert_eq!(g.total(b"Lima"), Some(230));
            assert_eq!(g.total(b"Quito"), Some(130));
            assert_eq!(g.minimum(b"Lima", b"Rice"), Some(110));
            assert_eq!(g.minimum(b"Quito", b"Corn"), Some(40));
            assert_eq!(g.minimum(b"Lima", b"Corn"), None);
            assert_eq!(g.records(), 4);
        }
    }
}
