use anyhow::Result;
use log::info;
use polarcore::{output, settings, sweep};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = settings::load_config()?;
    info!("{}", settings);

    let precision = settings.precision;
    let train = settings.train();
    let input = settings.input.jones();
    let exit = train.propagate(&input);

    println!("System matrix: {:.*}", precision, train.matrix());
    println!("Exit state: {:.*}", precision, exit);
    println!(
        "Transmittance: {:.*}, orientation: {:.*} deg, ellipticity: {:.*} deg",
        precision,
        train.transmittance(&input),
        precision,
        exit.orientation().to_degrees(),
        precision,
        exit.ellipticity().to_degrees(),
    );

    let points = sweep::analyzer_sweep(&train, &input, settings.sweep_points);
    match &settings.output {
        Some(path) => output::write_sweep(path, &points, precision)?,
        None => print!("{}", output::format_table(&points, precision)),
    }

    Ok(())
}
