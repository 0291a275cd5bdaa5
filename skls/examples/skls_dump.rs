use skls::{ArchiveIndex, ReadOptions};
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!("usage: skls_dump <archive.skls> [animation] [--lossy] [--json]");
    std::process::exit(2);
}

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut positional = Vec::<String>::new();
    let mut options = ReadOptions::default();
    let mut json = false;

    for arg in args {
        match arg.as_str() {
            "--lossy" => options = ReadOptions::lossy(),
            "--json" => json = true,
            _ => positional.push(arg),
        }
    }

    let Some(path) = positional.first().map(PathBuf::from) else {
        usage();
    };

    let archive = match ArchiveIndex::open_with_options(&path, options) {
        Ok(archive) => archive,
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            std::process::exit(1);
        }
    };

    let Some(name) = positional.get(1) else {
        for (name, offset) in archive.iter() {
            println!("{offset:>10}  {name}");
        }
        eprintln!("{} animation(s)", archive.len());
        return;
    };

    let animation = match archive.get(name) {
        Ok(animation) => animation,
        Err(e) => {
            eprintln!("{name}: {e}");
            std::process::exit(1);
        }
    };

    if json {
        #[cfg(feature = "json")]
        {
            let marks = archive.marks(name).unwrap_or_default();
            let value = serde_json::json!({ "animation": animation, "marks": marks });
            match serde_json::to_string_pretty(&value) {
                Ok(text) => println!("{text}"),
                Err(e) => eprintln!("json: {e}"),
            }
            return;
        }
        #[cfg(not(feature = "json"))]
        {
            eprintln!("--json requires building with feature `json`");
            std::process::exit(2);
        }
    }

    print!("{animation}");
}
