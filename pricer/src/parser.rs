use memchr::{memchr, memchr2};

pub const NEWLINE: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const COMMA: u8 = b',';
pub const PERIOD: u8 = b'.';

/// Fixed-point price, hundredths of a currency unit.
pub type Cents = u64;

/// One parsed line. Borrowed straight from the mapped bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub city: &'a [u8],
    pub product: &'a [u8],
    pub price: Cents,
}

/// Position inside a byte region. Every operation advances past what it consumed.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8], pos: usize) -> Self {
        Self {
            data,
            pos: pos.min(data.len()),
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Moves to the first record starting at or after the current position.
    ///
    /// A position is a record start when it is 0 or follows a line terminator; otherwise the
    /// partial line is discarded, terminator included.
    pub fn align(&mut self) {
        if self.pos == 0 || self.data[self.pos - 1] == NEWLINE {
            return;
        }
        self.skip_line();
    }

    /// Discards everything up to and including the next line terminator.
    pub fn skip_line(&mut self) {
        self.pos = match memchr(NEWLINE, &self.data[self.pos..]) {
            Some(off) => self.pos + off + 1,
            None => self.data.len(),
        };
    }

    /// Skips lines that carry nothing but a terminator.
    pub fn skip_blank_lines(&mut self) {
        loop {
            match self.peek() {
                Some(NEWLINE) => self.pos += 1,
                Some(CARRIAGE_RETURN) if self.data.get(self.pos + 1) == Some(&NEWLINE) => {
                    self.pos += 2
                }
                _ => return,
            }
        }
    }

    /// Returns the bytes up to the next field delimiter or line terminator and steps over
    /// that delimiter. At the end of the region the field runs to the last byte.
    #[inline]
    pub fn consume_field(&mut self) -> &'a [u8] {
        let rest = &self.data[self.pos..];
        match memchr2(COMMA, NEWLINE, rest) {
            Some(off) => {
                self.pos += off + 1;
                &rest[..off]
            }
            None => {
                self.pos = self.data.len();
                rest
            }
        }
    }

    /// Parses `digits[.d[d]]` into cents and stops at the first byte that does not fit.
    ///
    /// One fraction digit is scaled by 10, none by 100. Digits past the second are consumed
    /// and dropped. Line framing is left to the caller.
    #[inline]
    pub fn consume_price(&mut self) -> Cents {
        let mut units: Cents = 0;
        while let Some(d) = self.peek().filter(u8::is_ascii_digit) {
            units = units.wrapping_mul(10).wrapping_add(Cents::from(d - b'0'));
            self.pos += 1;
        }

        let mut cents: Cents = 0;
        let mut scale: Cents = 100;
        if self.peek() == Some(PERIOD) {
            self.pos += 1;
            while let Some(d) = self.peek().filter(u8::is_ascii_digit) {
                if scale > 1 {
                    scale /= 10;
                    cents += Cents::from(d - b'0') * scale;
                }
                self.pos += 1;
            }
        }

        units.wrapping_mul(100).wrapping_add(cents)
    }

    /// Parses one `city,product,price` line and leaves the cursor on the next line.
    #[inline]
    pub fn next_record(&mut self) -> Record<'a> {
        let city = self.consume_field();
        let product = self.consume_field();
        let price = self.consume_price();
        self.finish_line();
        Record {
            city,
            product,
            price,
        }
    }

    fn finish_line(&mut self) {
        match self.peek() {
            Some(NEWLINE) => self.pos += 1,
            Some(CARRIAGE_RETURN) if self.data.get(self.pos + 1) == Some(&NEWLINE) => {
                self.pos += 2
            }
            None => {}
            Some(_) => self.skip_line(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(text: &str) -> Cents {
        Cursor::new(text.as_bytes(), 0).consume_price()
    }

    #[test]
    fn price_scales_to_two_decimals() {
        assert_eq!(price("3"), 300);
        assert_eq!(price("3.5"), 350);
        assert_eq!(price("3.50"), 350);
        assert_eq!(price("3.05"), 305);
        assert_eq!(price("0.07"), 7);
        assert_eq!(price("120.9\n"), 12090);
    }

    #[test]
    fn price_ignores_extra_fraction_digits() {
        assert_eq!(price("3.059"), 305);
        assert_eq!(price("3."), 300);
    }

    #[test]
    fn price_stops_at_first_non_digit() {
        let mut cur = Cursor::new(b"12x4", 0);
        assert_eq!(cur.consume_price(), 1200);
        assert_eq!(cur.position(), 2);
        assert_eq!(price("abc"), 0);
    }

    #[test]
    fn fields_split_on_comma_and_newline() {
        let mut cur = Cursor::new(b"Cairo,Tea\nX", 0);
        assert_eq!(cur.consume_field(), b"Cairo");
        assert_eq!(cur.consume_field(), b"Tea");
        assert_eq!(cur.position(), 10);
        assert_eq!(cur.consume_field(), b"X");
        assert_eq!(cur.position(), 11);
    }

    #[test]
    fn record_with_crlf() {
        let data = b"Paris,Bread,2.5\r\nRome,Milk,1\n";
        let mut cur = Cursor::new(data, 0);
        assert_eq!(
            cur.next_record(),
            Record {
                city: b"Paris",
                product: b"Bread",
                price: 250
            }
        );
        assert_eq!(cur.position(), 17);
        assert_eq!(
            cur.next_record(),
            Record {
                city: b"Rome",
                product: b"Milk",
                price: 100
            }
        );
        assert_eq!(cur.position(), data.len());
    }

    #[test]
    fn record_without_trailing_newline() {
        let mut cur = Cursor::new(b"Oslo,Fish,9.99", 0);
        assert_eq!(cur.next_record().price, 999);
        assert_eq!(cur.position(), 14);
    }

    #[test]
    fn junk_after_price_is_discarded() {
        let mut cur = Cursor::new(b"A,B,1.00 extra\nC,D,2\n", 0);
        cur.next_record();
        assert_eq!(cur.next_record().city, b"C");
    }

    #[test]
    fn align_skips_partial_line() {
        let data = b"A,X,1.00\nB,Y,2.00\n";
        let mut cur = Cursor::new(data, 3);
        cur.align();
        assert_eq!(cur.position(), 9);

        let mut cur = Cursor::new(data, 9);
        cur.align();
        assert_eq!(cur.position(), 9);

        let mut cur = Cursor::new(data, 0);
        cur.align();
        assert_eq!(cur.position(), 0);

        let mut cur = Cursor::new(data, 12);
        cur.align();
        assert_eq!(cur.position(), data.len());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut cur = Cursor::new(b"\n\r\n\nA,B,1\n", 0);
        cur.skip_blank_lines();
        assert_eq!(cur.position(), 4);
    }
}
