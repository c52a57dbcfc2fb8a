//! fontsel - show which face renders each character of a text

use anyhow::{anyhow, bail, Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fontsel::config::Config;
use fontsel::font::{
    Attachment, FontEngine, FontPlatform, FontSession, FontconfigPlatform, FtEngine,
    SessionOptions, StaticFonts,
};
use fontsel::{StyleFlags, TextStyle};

fn print_help() {
    println!(
        r#"fontsel {} - font family resolution for text rendering

USAGE:
    fontsel [OPTIONS] TEXT

OPTIONS:
    -h, --help              Print this help message
    -V, --version           Print version information
    -f, --family SPEC       Family spec, e.g. '"DejaVu Sans", Arial'
    -m, --mono              Use the monospace family spec
    -b, --bold              Request bold
    -i, --italic            Request italic
    -s, --size PX           Explicit pixel size
    -a, --attach FILE       Add a font attachment (repeatable)
    --dump                  Log known families at debug level
    --write-config          Write the default config file and exit

EXAMPLES:
    fontsel 'Hello, 世界'
    fontsel -f 'Noto Sans, DejaVu Sans' -b 'Ωμέγα'
    RUST_LOG=debug fontsel --dump -a title.ttf 'abc'

CONFIG FILE:
    $FONTSEL_CONFIG, ~/.config/fontsel/config.toml or /etc/fontsel/config.toml"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    family: Option<String>,
    flags: StyleFlags,
    size: u32,
    attachments: Vec<PathBuf>,
    dump: bool,
    text: String,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut text = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-f" | "--family" => {
                parsed.family = Some(iter.next().context("--family needs a value")?.clone());
            }
            "-m" | "--mono" => parsed.flags |= StyleFlags::MONOSPACED,
            "-b" | "--bold" => parsed.flags |= StyleFlags::BOLD,
            "-i" | "--italic" => parsed.flags |= StyleFlags::ITALIC,
            "-s" | "--size" => {
                let value = iter.next().context("--size needs a value")?;
                parsed.size = value
                    .parse()
                    .with_context(|| format!("invalid size: {}", value))?;
            }
            "-a" | "--attach" => {
                parsed
                    .attachments
                    .push(PathBuf::from(iter.next().context("--attach needs a value")?));
            }
            "--dump" => parsed.dump = true,
            s if s.starts_with('-') && s.len() > 1 => bail!("unknown option: {}", s),
            s => text.push(s),
        }
    }

    parsed.text = text.join(" ");
    Ok(parsed)
}

fn read_attachment(path: &Path) -> Result<Attachment> {
    let data = std::fs::read(path)
        .map_err(|e| anyhow!("Failed to read font file: {} ({})", path.display(), e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(Attachment::new(&name, "", Rc::new(data)))
}

fn run<P: FontPlatform>(config: &Config, platform: P, args: &Args) -> Result<()> {
    let engine = FtEngine::new()?;
    let mut session = FontSession::new(engine, platform, SessionOptions::from(config));

    if !args.attachments.is_empty() {
        let attachments = args
            .attachments
            .iter()
            .map(|p| read_attachment(p))
            .collect::<Result<Vec<_>>>()?;
        session.load_attachments(&attachments);
    }

    let mut style = TextStyle {
        font_size: if args.size > 0 { args.size } else { config.font.size },
        relative_size: config.font.relative_size,
        flags: args.flags,
        family: Some(config.font.family.clone()),
        monospace_family: Some(config.font.monospace_family.clone()),
    };
    if let Some(spec) = &args.family {
        if args.flags.contains(StyleFlags::MONOSPACED) {
            style.monospace_family = Some(spec.clone());
        } else {
            style.family = Some(spec.clone());
        }
    }

    let mut seen = Vec::new();
    for ch in args.text.chars().filter(|c| !c.is_control()) {
        if seen.contains(&ch) {
            continue;
        }
        seen.push(ch);

        match session.select_face(&style, ch as u32) {
            Ok(face) => {
                let info = session.engine().describe(&face);
                let size = session.face_cache().target().pixel_size(&style);
                println!(
                    "U+{:04X} '{}' -> {} ({}{}) {}x{}px",
                    ch as u32,
                    ch,
                    info.family.as_deref().unwrap_or("?"),
                    if info.bold { "bold" } else { "regular" },
                    if info.italic { ", italic" } else { "" },
                    size.width,
                    size.height
                );
            }
            Err(e) => println!("U+{:04X} '{}' -> error: {}", ch as u32, ch, e),
        }
    }

    info!("{} faces cached", session.face_cache().len());
    if args.dump {
        session.dump_families();
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("fontsel {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.iter().any(|a| a == "--write-config") {
        let path = Config::write_default_config()?;
        println!("Config file generated: {}", path.display());
        return Ok(());
    }

    let parsed = parse_args(&args)?;
    if parsed.text.is_empty() {
        print_help();
        bail!("no text given");
    }

    let config = Config::load();
    let static_fonts = StaticFonts::new(
        PathBuf::from(&config.font.font_dir),
        config.font.font_file.clone(),
        config.font.monospace_font_file.clone(),
    );

    match FontconfigPlatform::new(static_fonts.clone()) {
        Ok(platform) => run(&config, platform, &parsed),
        Err(e) => {
            warn!("{}, using static font map", e);
            run(&config, static_fonts, &parsed)
        }
    }
}
