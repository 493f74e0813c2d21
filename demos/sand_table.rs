//! Spiral out from the center, write a block of text, finish with a loop
//! around the rim, and save the result as SVG and THR.
//!
//! ```sh
//! cargo run --example sand_table -- [output_dir] [text_block.ron]
//! ```
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use sandstroke::prelude::*;

fn main() -> Result<()> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let block = match args.next() {
        Some(file) => TextBlock::from_file(&PathBuf::from(file))?,
        None => TextBlock {
            line_spacing: 1.3,
            lines: vec![
                LineConfig::new("HELLO").scale(15.0),
                LineConfig::new("SAND").scale(20.0),
                LineConfig::new("TABLE").scale(15.0),
            ],
        },
    };

    let renderer = GlyphRenderer::new(Arc::new(GlyphTable::block_capitals()));
    let mut path = PointPath::new(0.0, 0.0);
    // Erase the table first.
    path.spiral_out(100.0, 100.0, 0.0);

    if let Err(err) = TextBlockLayout::new(&renderer).add_text_block(&mut path, &block) {
        eprintln!("Could not lay out text: {}", err);
        return Ok(());
    }

    path.outer_loop(2.0, 0.0);

    path.save_svg(&out_dir.join("sand_table.svg"), &SvgOptions::default())?;
    path.save_thr(&out_dir.join("sand_table.thr"), &ThrOptions::default())?;
    println!("Generated {} points.", path.len());
    Ok(())
}
