use std::env;
use std::fs;
use std::path::PathBuf;

use project::{ProjectData, merge_databases, resolve_photo_urls, sort_by_date_taken, validate};

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "validate" => cmd_validate(args),
        "merge" => cmd_merge(args),
        "sort" => cmd_sort(args),
        "resolve-urls" => cmd_resolve_urls(args),
        "id" => cmd_id(args),
        _ => Err(usage()),
    }
}

fn cmd_validate(args: Vec<String>) -> Result<(), String> {
    // waypoints validate <db.json>
    if args.len() != 1 {
        return Err(usage());
    }

    let data = read_project(&PathBuf::from(&args[0]))?;
    let issues = validate(&data.photos);
    for issue in &issues {
        eprintln!("{issue}");
    }
    if issues.is_empty() {
        eprintln!("{}: {} photos, no issues", data.name, data.photos.len());
        Ok(())
    } else {
        Err(format!("validation failed: {} issue(s)", issues.len()))
    }
}

fn cmd_merge(args: Vec<String>) -> Result<(), String> {
    // waypoints merge <db.json> <incoming.json> [incoming2.json ...] [--out PATH]
    let (mut paths, out) = split_out_flag(args)?;
    if paths.len() < 2 {
        return Err(usage());
    }

    let db_path = paths.remove(0);
    let mut data = read_project(&db_path)?;

    for path in &paths {
        let incoming = read_project(path)?;
        merge_databases(&mut data.photos, incoming.photos);
    }
    sort_by_date_taken(&mut data.photos);

    let out_path = out.unwrap_or(db_path);
    write_project(&out_path, &data)?;
    eprintln!("wrote {} ({} photos)", out_path.display(), data.photos.len());
    Ok(())
}

fn cmd_sort(args: Vec<String>) -> Result<(), String> {
    // waypoints sort <db.json> [--out PATH]
    let (paths, out) = split_out_flag(args)?;
    let [db_path] = paths.as_slice() else {
        return Err(usage());
    };

    let mut data = read_project(db_path)?;
    sort_by_date_taken(&mut data.photos);

    let out_path = out.unwrap_or_else(|| db_path.clone());
    write_project(&out_path, &data)?;
    eprintln!("wrote {}", out_path.display());
    Ok(())
}

fn cmd_resolve_urls(args: Vec<String>) -> Result<(), String> {
    // waypoints resolve-urls <db.json> [--out PATH]
    let (paths, out) = split_out_flag(args)?;
    let [db_path] = paths.as_slice() else {
        return Err(usage());
    };

    let mut data = read_project(db_path)?;
    if data.base_url.is_none() {
        return Err("project has no base_url to resolve against".to_string());
    }
    resolve_photo_urls(&mut data);

    let out_path = out.unwrap_or_else(|| db_path.clone());
    write_project(&out_path, &data)?;
    eprintln!("wrote {}", out_path.display());
    Ok(())
}

fn cmd_id(args: Vec<String>) -> Result<(), String> {
    // waypoints id <photo-file>
    let [path] = args.as_slice() else {
        return Err(usage());
    };

    let path = PathBuf::from(path);
    let bytes = fs::read(&path).map_err(|e| format!("read {path:?}: {e}"))?;
    println!("{}", blake3::hash(&bytes).to_hex());
    Ok(())
}

fn split_out_flag(args: Vec<String>) -> Result<(Vec<PathBuf>, Option<PathBuf>), String> {
    let mut paths = Vec::new();
    let mut out = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--out" => {
                i += 1;
                if i >= args.len() {
                    return Err("--out requires a path".to_string());
                }
                out = Some(PathBuf::from(&args[i]));
            }
            s if s.starts_with('-') => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
            _ => paths.push(PathBuf::from(&args[i])),
        }
        i += 1;
    }

    Ok((paths, out))
}

fn read_project(path: &PathBuf) -> Result<ProjectData, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    ProjectData::from_json(&raw).map_err(|e| format!("{}: {e}", path.display()))
}

fn write_project(path: &PathBuf, data: &ProjectData) -> Result<(), String> {
    let payload = data.to_json_pretty().map_err(|e| e.to_string())?;
    fs::write(path, payload).map_err(|e| format!("write {path:?}: {e}"))
}

fn usage() -> String {
    "usage:
  waypoints validate <db.json>
  waypoints merge <db.json> <incoming.json> [more.json ...] [--out PATH]
  waypoints sort <db.json> [--out PATH]
  waypoints resolve-urls <db.json> [--out PATH]
  waypoints id <photo-file>"
        .to_string()
}
