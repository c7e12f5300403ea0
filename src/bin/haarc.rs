use clap::{Parser};
use haarc::io::{cli, load_image, save_image};
use haarc::io::cli::{Request};

fn main() -> haarc::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = cli::Args::parse();
    let requests = args.requests()?;
    let out_path = args.out_path("haarc")?;
    let image = load_image(&args.in_path)?;
    log::debug!("Loaded {} ({}x{})", args.in_path, image.width(), image.height());
    for request in requests {
        match request {
            Request::Single {ratio} => {
                let report = haarc::compress_with_report(&image, ratio)?;
                if let Some(threshold) = report.cutoff.threshold() {
                    log::info!("Threshold: {}", threshold);
                }
                save_image(&report.image, &out_path)?;
                log::info!("Compressed image written to {} ({} coefficients zeroed)", out_path, report.zeroed);
            },
            Request::Progressive => {
                let stages = haarc::progressive(&image);
                let n = stages.len();
                for (j, stage) in stages.iter().enumerate() {
                    let path = cli::stage_path(&out_path, n - 1 - j)?;
                    save_image(stage, &path)?;
                    log::debug!("Progressive stage written to {}", path);
                }
                log::info!("{} progressive images written next to {}", n, out_path);
            },
        }
    }
    Ok(())
}
