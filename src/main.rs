use std::{
    fs::File,
    io::{self, BufWriter, Write},
    time::Instant,
};

use log::info;

use tsp_tour_core::{
    DistanceMatrix, Error, Point, Result, SolverOptions, load_points, logging, plan_tour,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let points = load_points(&options)?;
    options.check_point_count(points.len())?;
    info!("input: n={} mode={}", points.len(), options.mode);

    let planned = plan_tour(&points, options.mode)?;
    write_tour(&options, &planned.points)?;

    info!(
        "output: n={} length={:.3} time={:.2}s",
        planned.points.len(),
        planned.length,
        now.elapsed().as_secs_f32()
    );
    if let (Some(seed_length), Some(stats)) = (planned.seed_length, planned.two_opt) {
        info!(
            "output: mst_length={seed_length:.3} two_opt_passes={} two_opt_swaps={}",
            stats.passes, stats.swaps
        );
    }
    planned.tour.metrics(&DistanceMatrix::new(&points));

    Ok(())
}

fn write_tour(options: &SolverOptions, tour: &[Point]) -> Result<()> {
    let mut out: Box<dyn Write> = match options.output_path() {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            Error::other(format!("failed to create output {}: {e}", path.display()))
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    for point in tour {
        writeln!(out, "{point}")?;
    }
    out.flush()?;
    Ok(())
}
