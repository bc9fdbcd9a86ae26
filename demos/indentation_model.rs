//! Builds the geometry of a thin-film nanoindentation model and prints the
//! APDL commands that reproduce it.
//!
//! Run with: cargo run --example indentation_model --features tracing
//! Set RUST_LOG=info for the summary, or RUST_LOG=debug to also see shape construction.

use planform::{
    ApdlRecorder, FilmWithRoi, MemoryBackend, Point2D, Rectangle, Shape, Tip, TipOptions,
    TipProfile,
};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut backend = ApdlRecorder::new(MemoryBackend::new());

    let mut substrate = Rectangle::new(20_000.0, 10_000.0)?;
    substrate.create(&mut backend)?;

    let mut film = FilmWithRoi::new(20_000.0, 2_000.0, 4_000.0, 1_000.0)?;
    film.set_destination(substrate.points()[1])?;
    film.create_merged_to(&mut backend, substrate.geometry()?)?;

    // Berkovich tip resting on the film's top-left corner
    let mut tip = Tip::new(TipProfile::berkovich(), TipOptions::default())?;
    tip.set_destination(Point2D::new(0.0, 12_000.0))?;
    tip.create(&mut backend)?;

    println!("{}", backend.script());

    let session = backend.inner();
    tracing::info!(
        keypoints = session.keypoint_count(),
        lines = session.line_count(),
        areas = session.area_count(),
        "model built"
    );
    Ok(())
}
