//! Minimal SVG path-data reader for circuit outlines.
//!
//! Supports absolute `M`, `L`, `C` and `Z`, with implicit command repetition
//! (`L 1 2 3 4` is two line segments). Relative commands, arcs and quadratic
//! curves never appear in the bundled outlines and are rejected.

use paddock_protocol::{Point, Rect};

use super::GeometryError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char, usize),
    Number(f64),
}

fn tokenize(data: &str) -> Result<Vec<Token>, GeometryError> {
    let mut tokens = Vec::new();
    let bytes = data.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() || c == ',' {
            i += 1;
        } else if c.is_ascii_alphabetic() {
            match c {
                'M' | 'L' | 'C' | 'Z' => tokens.push(Token::Command(c, i)),
                _ => {
                    return Err(GeometryError::BadToken {
                        token: c.to_string(),
                        offset: i,
                    });
                }
            }
            i += 1;
        } else if !c.is_ascii() {
            let token = data[i..].chars().next().map_or_else(String::new, String::from);
            return Err(GeometryError::BadToken { token, offset: i });
        } else {
            let start = i;
            i += 1;
            while i < bytes.len() {
                let n = bytes[i] as char;
                let exponent_sign = (n == '-' || n == '+') && matches!(bytes[i - 1], b'e' | b'E');
                if n.is_ascii_digit() || n == '.' || n == 'e' || n == 'E' || exponent_sign {
                    i += 1;
                } else {
                    break;
                }
            }
            let text = &data[start..i];
            let value = text.parse::<f64>().map_err(|_| GeometryError::BadToken {
                token: text.to_string(),
                offset: start,
            })?;
            tokens.push(Token::Number(value));
        }
    }
    Ok(tokens)
}

/// Parse path data into absolute segments.
///
/// Only single-subpath outlines are accepted: a second `M` is an error.
pub fn parse_path(data: &str) -> Result<Vec<Segment>, GeometryError> {
    let tokens = tokenize(data)?;
    let mut segments = Vec::new();
    let mut iter = tokens.into_iter().peekable();
    let mut current: Option<char> = None;
    let mut seen_move = false;

    while let Some(token) = iter.peek().copied() {
        let command = match token {
            Token::Command(c, offset) => {
                iter.next();
                if c == 'M' && seen_move {
                    return Err(GeometryError::BadToken {
                        token: c.to_string(),
                        offset,
                    });
                }
                c
            }
            Token::Number(_) => match current {
                // Extra pairs after a moveto are implicit linetos.
                Some('M') => 'L',
                Some(c @ ('L' | 'C')) => c,
                _ => {
                    return Err(GeometryError::BadToken {
                        token: "number before command".to_string(),
                        offset: 0,
                    });
                }
            },
        };

        let mut point = || -> Result<Point, GeometryError> {
            let x = next_number(&mut iter, command)?;
            let y = next_number(&mut iter, command)?;
            Ok(Point::new(x, y))
        };

        match command {
            'M' => {
                segments.push(Segment::MoveTo(point()?));
                seen_move = true;
            }
            'L' => segments.push(Segment::LineTo(point()?)),
            'C' => {
                let c1 = point()?;
                let c2 = point()?;
                let to = point()?;
                segments.push(Segment::CubicTo { c1, c2, to });
            }
            _ => segments.push(Segment::Close),
        }
        if !seen_move {
            return Err(GeometryError::EmptyPath);
        }
        current = Some(command);
    }

    if segments.len() < 2 {
        return Err(GeometryError::EmptyPath);
    }
    Ok(segments)
}

fn next_number(
    iter: &mut std::iter::Peekable<std::vec::IntoIter<Token>>,
    command: char,
) -> Result<f64, GeometryError> {
    match iter.next_if(|t| matches!(t, Token::Number(_))) {
        Some(Token::Number(v)) => Ok(v),
        _ => Err(GeometryError::MissingCoordinate { command }),
    }
}

/// Parse `"min-x min-y width height"`.
pub fn parse_view_box(text: &str) -> Result<Rect, GeometryError> {
    let bad = || GeometryError::BadViewBox(text.to_string());
    let values = text
        .split(|c: char| c.is_ascii_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| bad()))
        .collect::<Result<Vec<_>, _>>()?;
    match values.as_slice() {
        &[x, y, w, h] if w > 0.0 && h > 0.0 => Ok(Rect::new(x, y, w, h)),
        _ => Err(bad()),
    }
}
