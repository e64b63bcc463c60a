// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS text to [`StyleValue`] parsing.
//!
//! Tokenization is delegated to `cssparser`; this module only maps token
//! sequences onto value variants. Anything it does not understand becomes
//! [`StyleValue::Invalid`] holding the original text, never an error.
//!
//! Numbers are re-read from the source slice rather than taken from the
//! token's `f32`, so the `Display` text of any persistable value parses back
//! to an identical value.

use alloc::vec::Vec;

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::property::StyleProperty;
use crate::value::{Layer, StyleValue, Unit};

type CssResult<'i, T> = Result<T, ParseError<'i, ()>>;

/// Parses CSS value text for `property`.
///
/// - identifiers become keywords
/// - numbers, percentages and dimensions become unit values
/// - `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()` and `rgba()` become colors
/// - space-separated components become a tuple
/// - comma-separated lists become layers for layered properties
///
/// `font-family` keeps its text verbatim as a single keyword.
///
/// # Example
///
/// ```rust
/// use tessera_property::{Layer, StyleProperty, StyleValue, Unit, parse_css_value};
///
/// assert_eq!(
///     parse_css_value(StyleProperty::Color, "#ff0000"),
///     StyleValue::rgb(255, 0, 0, 1.0),
/// );
/// assert_eq!(
///     parse_css_value(StyleProperty::TransitionDuration, "200ms, 1s"),
///     StyleValue::layers([
///         Layer::new(StyleValue::unit(200.0, Unit::Ms)),
///         Layer::new(StyleValue::unit(1.0, Unit::S)),
///     ]),
/// );
/// assert_eq!(
///     parse_css_value(StyleProperty::Width, "10px, 20px"),
///     StyleValue::invalid("10px, 20px"),
/// );
/// ```
#[must_use]
pub fn parse_css_value(property: StyleProperty, text: &str) -> StyleValue {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return StyleValue::invalid(text);
    }
    if property == StyleProperty::FontFamily {
        return StyleValue::keyword(trimmed);
    }

    let mut input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut input);
    let Ok(mut items) = parse_all(&mut parser) else {
        return StyleValue::invalid(text);
    };

    if property.is_layered() {
        return StyleValue::layers(items.into_iter().map(Layer::new));
    }
    match items.pop() {
        Some(item) if items.is_empty() => item,
        _ => StyleValue::invalid(text),
    }
}

fn parse_all<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, Vec<StyleValue>> {
    let items = parser.parse_comma_separated(parse_component_list)?;
    parser.expect_exhausted()?;
    Ok(items)
}

fn parse_component_list<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, StyleValue> {
    let mut items = Vec::new();
    while !parser.is_exhausted() {
        items.push(parse_component(parser)?);
    }
    if items.len() == 1
        && let Some(item) = items.pop()
    {
        return Ok(item);
    }
    if items.is_empty() {
        return Err(parser.new_custom_error(()));
    }
    Ok(StyleValue::Tuple { value: items })
}

fn parse_component<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, StyleValue> {
    let start = parser.position();
    let token = parser.next()?.clone();
    let text = parser.slice_from(start).trim();
    match token {
        Token::Ident(ident) => Ok(StyleValue::keyword(&*ident)),
        Token::Number { .. } => number(parser, text, 0, Unit::Number),
        Token::Percentage { .. } => number(parser, text, 1, Unit::Percent),
        Token::Dimension { ref unit, .. } => {
            let Some(kind) = Unit::from_suffix(unit) else {
                return Err(parser.new_custom_error(()));
            };
            number(parser, text, unit.len(), kind)
        }
        Token::Hash(ref hex) | Token::IDHash(ref hex) => {
            parse_hex(hex).ok_or_else(|| parser.new_custom_error(()))
        }
        Token::Function(ref name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            parser.parse_nested_block(parse_rgb_arguments)
        }
        _ => Err(parser.new_custom_error(())),
    }
}

fn number<'i>(
    parser: &Parser<'i, '_>,
    text: &str,
    suffix_len: usize,
    unit: Unit,
) -> CssResult<'i, StyleValue> {
    text.get(..text.len().saturating_sub(suffix_len))
        .and_then(|digits| digits.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(|value| StyleValue::unit(value, unit))
        .ok_or_else(|| parser.new_custom_error(()))
}

fn parse_rgb_arguments<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, StyleValue> {
    let r = parse_channel(parser)?;
    let _ = parser.try_parse(|p| p.expect_comma());
    let g = parse_channel(parser)?;
    let _ = parser.try_parse(|p| p.expect_comma());
    let b = parse_channel(parser)?;

    let mut alpha = 1.0;
    if !parser.is_exhausted() {
        let separated = parser.try_parse(|p| p.expect_comma()).is_ok()
            || parser.try_parse(|p| p.expect_delim('/')).is_ok();
        if !separated {
            return Err(parser.new_custom_error(()));
        }
        alpha = parse_alpha(parser)?;
    }
    parser.expect_exhausted()?;
    Ok(StyleValue::Rgb { r, g, b, alpha })
}

fn parse_channel<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, u8> {
    let channel = match parser.next()?.clone() {
        Token::Number { value, .. } => value,
        Token::Percentage { unit_value, .. } => unit_value * 255.0,
        _ => return Err(parser.new_custom_error(())),
    };
    // Channels are clamped to 0..=255 first, so the truncating cast after
    // adding one half rounds to nearest.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is clamped to the u8 range"
    )]
    let channel = (channel.clamp(0.0, 255.0) + 0.5) as u8;
    Ok(channel)
}

fn parse_alpha<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, f32> {
    let start = parser.position();
    let token = parser.next()?.clone();
    let text = parser.slice_from(start).trim();
    let alpha = match token {
        Token::Number { .. } => text.parse::<f32>().ok(),
        Token::Percentage { unit_value, .. } => Some(unit_value),
        _ => None,
    };
    alpha
        .filter(|alpha| alpha.is_finite())
        .map(|alpha| alpha.clamp(0.0, 1.0))
        .ok_or_else(|| parser.new_custom_error(()))
}

fn parse_hex(hex: &str) -> Option<StyleValue> {
    let digit = |index: usize| {
        hex.get(index..=index)
            .and_then(|d| u8::from_str_radix(d, 16).ok())
    };
    let pair = |index: usize| {
        hex.get(index..index + 2)
            .and_then(|d| u8::from_str_radix(d, 16).ok())
    };
    let (r, g, b, a) = match hex.len() {
        3 | 4 => {
            let short = |index| digit(index).map(|d| d * 17);
            let a = if hex.len() == 4 { short(3)? } else { 255 };
            (short(0)?, short(1)?, short(2)?, a)
        }
        6 | 8 => {
            let a = if hex.len() == 8 { pair(6)? } else { 255 };
            (pair(0)?, pair(2)?, pair(4)?, a)
        }
        _ => return None,
    };
    Some(StyleValue::Rgb {
        r,
        g,
        b,
        alpha: f32::from(a) / 255.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn keywords_and_units() {
        assert_eq!(
            parse_css_value(StyleProperty::Display, "flex"),
            StyleValue::keyword("flex")
        );
        assert_eq!(
            parse_css_value(StyleProperty::Width, " 12.5rem "),
            StyleValue::unit(12.5, Unit::Rem)
        );
        assert_eq!(
            parse_css_value(StyleProperty::Width, "-4px"),
            StyleValue::px(-4.0)
        );
        assert_eq!(
            parse_css_value(StyleProperty::Width, "50%"),
            StyleValue::unit(50.0, Unit::Percent)
        );
        assert_eq!(
            parse_css_value(StyleProperty::LineHeight, "1.2"),
            StyleValue::unit(1.2, Unit::Number)
        );
    }

    #[test]
    fn colors() {
        assert_eq!(
            parse_css_value(StyleProperty::Color, "#0f0"),
            StyleValue::rgb(0, 255, 0, 1.0)
        );
        assert_eq!(
            parse_css_value(StyleProperty::Color, "rgb(10, 20, 30)"),
            StyleValue::rgb(10, 20, 30, 1.0)
        );
        assert_eq!(
            parse_css_value(StyleProperty::Color, "rgba(10, 20, 30, 0.25)"),
            StyleValue::rgb(10, 20, 30, 0.25)
        );
        assert_eq!(
            parse_css_value(StyleProperty::Color, "rgb(10 20 30 / 50%)"),
            StyleValue::rgb(10, 20, 30, 0.5)
        );
        assert_eq!(
            parse_css_value(StyleProperty::Color, "#00000080"),
            StyleValue::rgb(0, 0, 0, 128.0 / 255.0)
        );
    }

    #[test]
    fn tuples_and_layers() {
        assert_eq!(
            parse_css_value(StyleProperty::Translate, "10px 20px"),
            StyleValue::tuple([StyleValue::px(10.0), StyleValue::px(20.0)])
        );
        assert_eq!(
            parse_css_value(StyleProperty::BoxShadow, "0 0 4px #000"),
            StyleValue::layers([Layer::new(StyleValue::tuple([
                StyleValue::unit(0.0, Unit::Number),
                StyleValue::unit(0.0, Unit::Number),
                StyleValue::px(4.0),
                StyleValue::rgb(0, 0, 0, 1.0),
            ]))])
        );
    }

    #[test]
    fn font_family_is_verbatim() {
        assert_eq!(
            parse_css_value(StyleProperty::FontFamily, " \"Inter\", sans-serif "),
            StyleValue::keyword("\"Inter\", sans-serif")
        );
    }

    #[test]
    fn garbage_is_invalid_not_an_error() {
        for text in ["", "10px)", "#12", "rgb(1, 2)", "10furlong", "url(x.png)"] {
            let value = parse_css_value(StyleProperty::Width, text);
            assert_eq!(value, StyleValue::invalid(text), "{text}");
        }
    }

    #[test]
    fn display_text_parses_back() {
        let value = StyleValue::rgb(12, 34, 56, 0.3);
        let text = value.to_string();
        assert_eq!(parse_css_value(StyleProperty::Color, &text), value);

        let value = StyleValue::unit(0.1, Unit::Em);
        assert_eq!(
            parse_css_value(StyleProperty::Width, &value.to_string()),
            value
        );
    }
}
