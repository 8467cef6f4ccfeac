use std::fmt;
use std::fs;
use std::path::Path;

use crate::aggregator::Aggregator;
use crate::error::{Error, Result};
use crate::parser::Cents;

pub const TOP_PRODUCTS: usize = 5;

/// Cents rendered as `units.cc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(pub Cents);

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cheapest {
    pub city: String,
    pub total: Price,
    pub products: Vec<(String, Price)>,
}

impl fmt::Display for Cheapest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.city, self.total)?;
        for (name, price) in &self.products {
            writeln!(f, "{name} {price}")?;
        }
        Ok(())
    }
}

/// Lowest-total city (ties to the smaller name) and its `top` cheapest products, ordered by
/// price then name. A city with fewer products yields only those it has.
pub fn cheapest(agg: &Aggregator, top: usize) -> Option<Cheapest> {
    let (city, total) = agg
        .cities()
        .min_by(|(an, at), (bn, bt)| at.cmp(bt).then_with(|| an.cmp(bn)))?;

    let mut products = agg.products_of(city);
    products.sort_unstable_by(|(an, ap), (bn, bp)| ap.cmp(bp).then_with(|| an.cmp(bn)));
    products.truncate(top);

    if products.len() < top {
        log::warn!(
            "{} has only {} product(s), reporting fewer than {top}",
            String::from_utf8_lossy(city),
            products.len()
        );
    }

    Some(Cheapest {
        city: String::from_utf8_lossy(city).into_owned(),
        total: Price(total),
        products: products
            .into_iter()
            .map(|(name, min)| (String::from_utf8_lossy(name).into_owned(), Price(min)))
            .collect(),
    })
}

/// Renders the report text; empty when nothing was recorded.
pub fn render(agg: &Aggregator, top: usize) -> String {
    cheapest(agg, top).map(|c| c.to_string()).unwrap_or_default()
}

pub fn write_report<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg(data: &[u8]) -> Aggregator {
        let mut agg = Aggregator::new();
        agg.consume(data, 0..data.len());
        agg
    }

    #[test]
    fn price_formatting() {
        assert_eq!(Price(0).to_string(), "0.00");
        assert_eq!(Price(5).to_string(), "0.05");
        assert_eq!(Price(350).to_string(), "3.50");
        assert_eq!(Price(123456).to_string(), "1234.56");
    }

    #[test]
    fn single_product_city_wins() {
        let got = render(&agg(b"A,X,1.00\nA,Y,2.00\nB,X,0.50\n"), TOP_PRODUCTS);
        assert_eq!(got, "B 0.50\nX 0.50\n");
    }

    #[test]
    fn city_tie_goes_to_smaller_name() {
        let got = render(&agg(b"B,X,1.00\nA,X,1.00\n"), TOP_PRODUCTS);
        assert_eq!(got, "A 1.00\nX 1.00\n");
    }

    #[test]
    fn products_sorted_by_price_then_name() {
        let data = b"C,f,3\nC,e,1\nC,d,2\nC,c,1\nC,b,4\nC,a,5\nC,e,0.5\nC,g,9\n";
        let report = cheapest(&agg(data), TOP_PRODUCTS).unwrap();
        let names: Vec<_> = report.products.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["e", "c", "d", "f", "b"]);
        assert_eq!(report.products[0].1, Price(50));
        assert_eq!(report.total, Price(2550));
    }

    #[test]
    fn nothing_recorded_renders_empty() {
        assert_eq!(render(&Aggregator::new(), TOP_PRODUCTS), "");
        assert!(cheapest(&Aggregator::new(), TOP_PRODUCTS).is_none());
    }
}
