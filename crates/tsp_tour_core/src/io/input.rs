use std::{fs, io::Read};

use crate::{Error, Point, Result, options::SolverOptions, random::RandomPoints};

/// Loads the point set the options describe: generated when `--random` is set,
/// otherwise parsed from `--input` or stdin. Asking for both is an error.
pub fn load_points(options: &SolverOptions) -> Result<Vec<Point>> {
    if options.random > 0 {
        if let Some(path) = options.input_path() {
            return Err(Error::invalid_input(format!(
                "--random {} and --input {} are mutually exclusive",
                options.random,
                path.display()
            )));
        }
        let points = RandomPoints::from_options(options)?.generate(options.random);
        log::info!(
            "input: generated n={} seed={} canvas={}",
            points.len(),
            options.seed,
            options.canvas_size
        );
        return Ok(points);
    }

    let raw = match options.input_path() {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!("failed to read input {}: {e}", path.display()))
        })?,
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            raw
        }
    };

    parse_points(&raw)
}

/// Whitespace separated `x,y` tokens.
pub fn parse_points(input: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (idx, tok) in input.split_whitespace().enumerate() {
        let mut it = tok.split(',');
        let x_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {}: missing x", idx + 1)))?;
        let y_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {}: missing y", idx + 1)))?;

        if it.next().is_some() {
            return Err(Error::invalid_input(format!(
                "Token {}: expected 'x,y' but got extra comma fields: {tok}",
                idx + 1
            )));
        }

        let x: f64 = x_s.parse().map_err(|_| {
            Error::invalid_input(format!("Token {}: invalid x: {x_s}", idx + 1))
        })?;
        let y: f64 = y_s.parse().map_err(|_| {
            Error::invalid_input(format!("Token {}: invalid y: {y_s}", idx + 1))
        })?;

        let point = Point::new(x, y);
        if !point.is_valid() {
            return Err(Error::invalid_input(format!(
                "Token {}: coordinates must be finite: {tok}",
                idx + 1
            )));
        }
        points.push(point);
    }

    Ok(points)
}
