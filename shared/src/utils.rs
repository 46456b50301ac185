// Number handling shared by the client state and the GUI.
//
// Prices come from two directions: free text typed into the article form and
// decimal values sent by the store (often serialized as strings). Both go
// through `ars_format::parse_number`, and everything shown to the user goes out
// through `ars_format::format_currency`.

pub mod ars_format {
    use serde_json::Value;

    /// Anything that can be coerced into a canonical price.
    ///
    /// Numbers pass through unchanged, text goes through the separator
    /// heuristic and absent values are never numbers.
    pub trait NumericInput {
        fn to_number(&self) -> Option<f64>;
    }

    impl NumericInput for f64 {
        fn to_number(&self) -> Option<f64> {
            Some(*self).filter(|v| v.is_finite())
        }
    }

    impl NumericInput for i64 {
        fn to_number(&self) -> Option<f64> {
            Some(*self as f64)
        }
    }

    impl NumericInput for str {
        fn to_number(&self) -> Option<f64> {
            parse_text(self)
        }
    }

    impl NumericInput for String {
        fn to_number(&self) -> Option<f64> {
            parse_text(self)
        }
    }

    impl<T: NumericInput + ?Sized> NumericInput for &T {
        fn to_number(&self) -> Option<f64> {
            (**self).to_number()
        }
    }

    impl<T: NumericInput> NumericInput for Option<T> {
        fn to_number(&self) -> Option<f64> {
            self.as_ref().and_then(NumericInput::to_number)
        }
    }

    impl NumericInput for Value {
        fn to_number(&self) -> Option<f64> {
            match self {
                Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
                Value::String(s) => parse_text(s),
                Value::Bool(b) => parse_text(&b.to_string()),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            }
        }
    }

    /// Parses loosely formatted numeric input into a finite value.
    ///
    /// `None` is the not-a-number result. When text contains both `,` and `.`
    /// the right-most one is the decimal point and the other is thousands
    /// grouping; a lone `,` is a decimal comma.
    pub fn parse_number<T: NumericInput + ?Sized>(input: &T) -> Option<f64> {
        input.to_number()
    }

    /// Formats a value as Argentine pesos, e.g. `$ 1.234,56`.
    ///
    /// Never fails: anything that is not a number renders as zero.
    pub fn format_currency<T: NumericInput + ?Sized>(value: &T) -> String {
        let amount = parse_number(value).unwrap_or(0.0);
        let (units, cents) = round_to_cents(amount.abs());
        let negative = amount.is_sign_negative();
        format!(
            "{}$\u{a0}{},{}",
            if negative { "-" } else { "" },
            group_thousands(&units),
            cents
        )
    }

    fn parse_text(raw: &str) -> Option<f64> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return None;
        }

        let normalized = match (compact.rfind(','), compact.rfind('.')) {
            (Some(comma), Some(dot)) if comma > dot => {
                compact.replace('.', "").replacen(',', ".", 1)
            }
            (Some(_), Some(_)) => compact.replace(',', ""),
            (Some(_), None) => compact.replacen(',', ".", 1),
            (None, _) => compact,
        };

        leading_literal(&normalized)
            .and_then(|literal| literal.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    // Longest decimal literal at the start of `s`: [sign] digits [. digits] [exp].
    // Trailing garbage is ignored, a string without any digit yields None.
    fn leading_literal(s: &str) -> Option<&str> {
        let bytes = s.as_bytes();
        let digits_from = |mut i: usize| {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            i
        };

        let mut end = match bytes.first() {
            Some(b'+') | Some(b'-') => 1,
            _ => 0,
        };
        let int_start = end;
        end = digits_from(end);
        let mut digit_count = end - int_start;

        if bytes.get(end) == Some(&b'.') {
            let frac_end = digits_from(end + 1);
            // "5." still counts as a literal, so "5.e3" keeps its exponent
            if frac_end > end + 1 || digit_count > 0 {
                digit_count += frac_end - end - 1;
                end = frac_end;
            }
        }
        if digit_count == 0 {
            return None;
        }

        if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
                exp += 1;
            }
            let exp_end = digits_from(exp);
            if exp_end > exp {
                end = exp_end;
            }
        }

        Some(&s[..end])
    }

    // Rounds half away from zero on the shortest decimal representation, so
    // 1.005 becomes 1,01 the way the display locale does it.
    fn round_to_cents(abs: f64) -> (String, String) {
        let repr = abs.to_string();
        let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

        let mut digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
        let frac: Vec<u8> = frac_part
            .bytes()
            .map(|b| b - b'0')
            .chain(std::iter::repeat(0))
            .take(3)
            .collect();
        digits.extend_from_slice(&frac[..2]);

        if frac[2] >= 5 {
            let mut idx = digits.len();
            loop {
                if idx == 0 {
                    digits.insert(0, 1);
                    break;
                }
                idx -= 1;
                if digits[idx] == 9 {
                    digits[idx] = 0;
                } else {
                    digits[idx] += 1;
                    break;
                }
            }
        }

        let split = digits.len() - 2;
        let to_text = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
        let units = to_text(&digits[..split]);
        let units = units.trim_start_matches('0');
        let units = if units.is_empty() { "0".to_string() } else { units.to_string() };
        (units, to_text(&digits[split..]))
    }

    fn group_thousands(units: &str) -> String {
        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, ch) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        grouped
    }

}
