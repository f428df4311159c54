use argh::FromArgs;
use std::path::PathBuf;

use morpho::image::{GrayImage, ImageSize};
use morpho::imgproc::morphology;
use morpho::io::raw;

#[derive(FromArgs)]
/// Apply a morphological open or close to a raw headerless grayscale image
struct Args {
    /// path to the input raw image
    #[argh(option)]
    input: PathBuf,

    /// width of the raw image in pixels
    #[argh(option, short = 'w')]
    width: usize,

    /// height of the raw image in pixels
    #[argh(option, short = 'h')]
    height: usize,

    /// number of erosions (open) or dilations (close) before the final pass
    #[argh(option, short = 'l', default = "1")]
    levels: usize,

    /// operation to apply: open or close
    #[argh(option, default = "String::from(\"open\")")]
    op: String,

    /// path to the output raw image (defaults to overwriting the input)
    #[argh(option)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    if args.width == 0 || args.height == 0 {
        return Err("width and height must be positive".into());
    }
    if (args.width * args.height) % 64 != 0 {
        return Err("width * height must be a multiple of 64".into());
    }

    // read the raw image, dimensions supplied on the command line
    let size = ImageSize {
        width: args.width,
        height: args.height,
    };
    let image = raw::read_image_raw(&args.input, size)?;

    let mut output = GrayImage::from_size_val(size, 0)?;
    match args.op.as_str() {
        "open" => morphology::open(&image, &mut output, args.levels)?,
        "close" => morphology::close(&image, &mut output, args.levels)?,
        other => return Err(format!("unknown operation: {other}").into()),
    }

    let output_path = match args.output {
        Some(path) => path,
        None => {
            log::info!("overwriting input image file");
            args.input
        }
    };
    raw::write_image_raw(output_path, &output)?;

    Ok(())
}
