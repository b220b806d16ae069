use anyhow::Context;
use clap::{Parser, Subcommand};
use fatscope_core::FatscopeError;
use fatscope_fat12::{DirEntry, Fat12Reader, FatAttributes, ImageFile};
use log::debug;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fatscope")]
#[command(about = "Browse FAT12 volume images without mounting them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show volume geometry
    Info {
        /// Path to the volume image
        image: PathBuf,
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// List a directory
    Ls {
        /// Path to the volume image
        image: PathBuf,
        /// Directory path inside the volume
        #[arg(default_value = "/")]
        path: String,
    },
    /// Print a file's contents
    Cat {
        /// Path to the volume image
        image: PathBuf,
        /// File path inside the volume
        path: String,
    },
    /// Browse the volume interactively
    Browse {
        /// Path to the volume image
        image: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { image, json } => {
            let reader = open_reader(&image)?;
            let geo = reader.geometry();
            if json {
                println!("{}", serde_json::to_string_pretty(geo)?);
            } else {
                println!("Volume: {}", image.display());
                println!("  OEM name: {}", geo.oem_name);
                println!("  Volume label: {}", geo.volume_label);
                println!("  Filesystem: {}", geo.fs_type);
                println!("  Bytes per sector: {}", geo.bytes_per_sector);
                println!("  Sectors per cluster: {}", geo.sectors_per_cluster);
                println!("  Reserved sectors: {}", geo.reserved_sectors);
                println!("  FATs: {} x {} sectors", geo.fat_count, geo.fat_size_sectors);
                println!("  Root entries: {}", geo.root_dir_entries);
                println!("  Total sectors: {}", geo.total_sectors);
                println!("  Root directory sector: {}", geo.root_dir_sector);
                println!("  Data region start: {}", geo.data_region_start_sector);
            }
        }
        Commands::Ls { image, path } => {
            let mut reader = open_reader(&image)?;
            let sector = reader
                .resolve_dir(&path)
                .with_context(|| format!("cannot resolve {}", path))?;
            let entries = reader.read_directory(sector)?;
            if entries.is_empty() {
                println!("(empty directory)");
            } else {
                print_listing(&entries);
            }
        }
        Commands::Cat { image, path } => {
            let mut reader = open_reader(&image)?;
            let data = reader
                .read_file_at(&path)
                .with_context(|| format!("cannot read {}", path))?;
            io::stdout().write_all(&data)?;
        }
        Commands::Browse { image } => {
            let reader = open_reader(&image)?;
            browse(reader)?;
        }
    }

    Ok(())
}

fn open_reader(image: &PathBuf) -> anyhow::Result<Fat12Reader<ImageFile>> {
    let source = ImageFile::open(image)
        .with_context(|| format!("cannot open image {}", image.display()))?;
    Ok(Fat12Reader::open(source)?)
}

/// Interactive session: list the current directory, prompt for a 1-based
/// selection, descend into directories, print files, `0` to go back,
/// `q` to quit.
fn browse(mut reader: Fat12Reader<ImageFile>) -> anyhow::Result<()> {
    let stdin = io::stdin();

    loop {
        let entries = reader.list_current()?;
        println!();
        if entries.is_empty() {
            println!("(empty directory)");
        } else {
            print_listing(&entries);
        }
        print!("Select an entry (0 to go back, q to quit): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        debug!("selection input: {:?}", input);

        match input {
            "" => continue,
            "q" | "quit" => break,
            "0" => match reader.back() {
                Ok(_) => {}
                Err(FatscopeError::NavigationUnderflow) => {
                    println!("Cannot go back further.");
                }
                Err(e) => return Err(e.into()),
            },
            _ => {
                let index: usize = match input.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        println!("Invalid selection: {}", input);
                        continue;
                    }
                };
                match reader.entry_at(index) {
                    Ok(entry) if entry.is_directory() => {
                        reader.enter(index)?;
                    }
                    Ok(entry) => {
                        let data = reader.read_file(&entry)?;
                        io::stdout().write_all(&data)?;
                        println!();
                    }
                    Err(FatscopeError::NotFound(_)) | Err(FatscopeError::InvalidInput(_)) => {
                        println!("Invalid selection: {}", input);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    Ok(())
}

fn print_listing(entries: &[DirEntry]) {
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:>3}  {:<12}  {}  {}  {}  {}  {}",
            i + 1,
            entry.name,
            attribute_letters(entry.attributes),
            entry.created,
            entry.last_access,
            entry.last_write,
            if entry.is_directory() {
                String::new()
            } else {
                format!("{}b", entry.size)
            }
        );
    }
}

fn attribute_letters(attr: FatAttributes) -> String {
    let mut letters = String::with_capacity(5);
    letters.push(if attr.is_directory() { 'D' } else { '-' });
    letters.push(if attr.is_read_only() { 'R' } else { '-' });
    letters.push(if attr.is_hidden() { 'H' } else { '-' });
    letters.push(if attr.is_system() { 'S' } else { '-' });
    letters.push(if attr.is_archive() { 'A' } else { '-' });
    letters
}
