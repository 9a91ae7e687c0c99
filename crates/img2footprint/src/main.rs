use clap::Parser;
use img2footprint::{convert_to_file, ConvertOptions, Side};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "img2footprint", about = "Convert a raster image to a KiCad footprint")]
struct Cli {
    /// Input image file (.png, .jpg, ...)
    input: PathBuf,

    /// Output footprint file
    output: PathBuf,

    /// Physical width in inches
    #[arg(long, default_value_t = 3.5)]
    width: f64,

    /// Physical height in inches
    #[arg(long, default_value_t = 2.0)]
    height: f64,

    /// Board layer the polygons are placed on
    #[arg(long, default_value = "F.Mask")]
    layer: String,

    /// Place the artwork on the front side (default)
    #[arg(long, conflicts_with = "back")]
    front: bool,

    /// Mirror the artwork for the back side
    #[arg(long)]
    back: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let opts = ConvertOptions {
        width: cli.width,
        height: cli.height,
        layer: cli.layer.clone(),
        side: match (cli.front, cli.back) {
            (_, true) => Side::Back,
            _ => Side::Front,
        },
    };

    match convert_to_file(&cli.input, &cli.output, &opts) {
        Ok(()) => println!("ok"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
