extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelbrot;
extern crate num_cpus;

use clap::{App, AppSettings, Arg, ArgMatches};
use mandelbrot::config::{parse_complex, parse_pair, parse_pixels_per_unit, DEFAULT_ITER_MAX};
use mandelbrot::{PlaneWindow, RenderConfig};
use std::path::Path;
use std::str::FromStr;

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const PIXELS_PER_UNIT: &str = "pixels_per_unit";
const OUTPUT: &str = "output";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";

const DEFAULT_OUTPUT: &str = "out.png";
const DEFAULT_LEFTLOWER: &str = "-2,-1";
const DEFAULT_RIGHTUPPER: &str = "1,1";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelbrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Escape-time Mandelbrot renderer")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::with_name(PIXELS_PER_UNIT)
                .required(false)
                .index(1)
                .help("Pixels per unit of the complex plane (anything but a positive integer means 1000)"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT)
                .help("Output file; .ppm or .pnm writes a pixmap, anything else a PNG"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value(DEFAULT_LEFTLOWER)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value(DEFAULT_RIGHTUPPER)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration cap; also the number of gradient buckets"),
        )
        .get_matches()
}

fn config_from(matches: &ArgMatches) -> Result<RenderConfig, mandelbrot::Error> {
    let corner = |name: &str, default: &str| {
        parse_complex(matches.value_of(name).unwrap_or(default))
            .or_else(|| parse_complex(default))
            .unwrap_or_default()
    };
    let window = PlaneWindow::from_corners(
        corner(LEFTLOWER, DEFAULT_LEFTLOWER),
        corner(RIGHTUPPER, DEFAULT_RIGHTUPPER),
    )?;

    Ok(RenderConfig {
        pixels_per_unit: parse_pixels_per_unit(matches.value_of(PIXELS_PER_UNIT)),
        window,
        iter_max: matches
            .value_of(ITERATIONS)
            .and_then(|s| usize::from_str(s).ok())
            .unwrap_or(DEFAULT_ITER_MAX),
        threads: matches
            .value_of(THREADS)
            .and_then(|s| usize::from_str(s).ok())
            .unwrap_or(1),
        ..RenderConfig::default()
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = args();
    let output = matches.value_of(OUTPUT).unwrap_or(DEFAULT_OUTPUT);

    let raster = match config_from(&matches).and_then(|config| mandelbrot::render(&config)) {
        Ok(raster) => raster,
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    };

    match mandelbrot::emit(&raster, Path::new(output)) {
        Ok(()) => println!("Done!"),
        Err(e) => {
            error!("{}", e);
            println!("Failed to save the file!");
            std::process::exit(1);
        }
    }
}
