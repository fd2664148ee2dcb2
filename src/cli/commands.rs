use crate::cli::args::{
    CheckArgs, ContextCommand, FilesArgs, InteractiveArgs, LookupArgs, MapArgs, NameArgs,
    ReverseArgs,
};
use crate::cli::output::{CommandOutput, LookupResult, MapSummary};
use crate::config::{ContextKey, Settings};
use crate::debugger::{convert_name, CompilerContext, Mapper, MapperRegistry, ModuleContext};
use crate::repl::{start_repl, ReplConfig};
use crate::sourcemap::{FsLoader, SourceMap};
use crate::ui::formatter::Formatter;
use crate::{MappingError, Result};
use serde::Serialize;
use std::path::Path;

fn print_info(message: impl AsRef<str>) {
    println!("{}", Formatter::info(message));
}

fn print_success(message: impl AsRef<str>) {
    println!("{}", Formatter::success(message));
}

fn print_warning(message: impl AsRef<str>) {
    println!("{}", Formatter::warning(message));
}

fn print_json<T: Serialize>(output: &CommandOutput<T>) -> Result<()> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| miette::miette!("Failed to serialize output: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn validate_line(line: u32) -> std::result::Result<u32, MappingError> {
    if line == 0 {
        return Err(MappingError::InvalidQuery(
            "line numbers start at 1".to_string(),
        ));
    }
    Ok(line)
}

fn report_version(err: &MappingError) {
    if matches!(err, MappingError::IncompatibleVersion(_)) {
        eprintln!(
            "{}",
            Formatter::warning(
                "The line map that was loaded is of an incompatible version. Please upgrade mapping-debug."
            )
        );
    }
}

/// Load the map named by `args`, or the one stored in `settings` for the
/// script. Returns the context and the path the map was read from.
fn open_context(args: &MapArgs, settings: &mut Settings) -> Result<(CompilerContext, String)> {
    let script = args.script().ok_or_else(|| {
        MappingError::InvalidQuery("either --map or --script is required".to_string())
    })?;

    let loader = FsLoader::new();
    let mut context = CompilerContext::new(script.clone());
    let loaded = match &args.map {
        Some(path) => context
            .load_source_map(&loader, settings, &path.to_string_lossy())
            .map(|_| ()),
        None => match context.restore(&loader, settings) {
            Ok(true) => Ok(()),
            Ok(false) => {
                return Err(MappingError::InvalidQuery(format!(
                    "no line map stored for {}; pass --map or run `mapping-debug context set --source-map`",
                    script
                ))
                .into())
            }
            Err(err) => Err(err),
        },
    };
    if let Err(err) = loaded {
        report_version(&err);
        return Err(err.into());
    }

    let map_path = settings
        .get_for_context(&script, ContextKey::SourceMap)
        .unwrap_or_default()
        .to_string();
    Ok((context, map_path))
}

/// Like [`open_context`], keeping only the map. `settings` is not modified.
fn open_map(args: &MapArgs, settings: &Settings) -> Result<(SourceMap, String)> {
    let (context, map_path) = open_context(args, &mut settings.clone())?;
    let map = context
        .into_source_map()
        .ok_or_else(|| MappingError::InvalidQuery(format!("no line map loaded from {}", map_path)))?;
    Ok((map, map_path))
}

/// Execute the check command
pub fn check(mut args: CheckArgs, settings: &Settings) -> Result<()> {
    args.output.merge_settings(settings);
    let (map, map_path) = open_map(&args.map, settings)?;

    if args.output.json {
        return print_json(&CommandOutput::ok(MapSummary {
            script: map.script().to_string(),
            lines: map.line_count(),
            mapped_lines: map.mapped_line_count(),
            mappings: map.mapping_count(),
        }));
    }

    print_success(format!("Line map loaded: {}", map_path));
    print_info(Formatter::format_map_summary(&map));
    Ok(())
}

/// Execute the lookup command
pub fn lookup(mut args: LookupArgs, settings: &Settings) -> Result<()> {
    args.output.merge_settings(settings);
    let line = validate_line(args.line)?;

    // Work on a copy so that loading the map does not touch saved settings.
    let mut scratch = settings.clone();
    let (context, _) = open_context(&args.map, &mut scratch)?;
    let script = context.url().to_string();

    let mut registry = MapperRegistry::new();
    registry.register(Mapper::Compiler(context));

    let mapping = registry.mapped_source(&scratch, &script, line, args.offset);
    let name = registry.mapped_name(&script, line, args.offset);
    let failures = registry
        .mappers()
        .iter()
        .filter_map(|m| match m {
            Mapper::Compiler(ctx) => ctx.source_map().map(SourceMap::decode_failures),
            Mapper::Modules(_) => None,
        })
        .sum::<usize>();

    if args.output.json {
        return print_json(&CommandOutput::ok(LookupResult {
            line,
            offset: args.offset,
            mapping,
            name,
        }));
    }

    match mapping {
        Some(mapped) => {
            print_success(Formatter::format_record(&mapped.record));
            match (&mapped.path, &mapped.path_error) {
                (Some(path), _) => print_info(format!("Source: {}", path.display())),
                (None, Some(err)) => print_warning(format!(
                    "{}; set one with `mapping-debug context set --root-path`",
                    err
                )),
                (None, None) => {}
            }
            if let Some(name) = name {
                let converted = convert_name(&name, false);
                print_info(format!(
                    "Original name: {}",
                    Formatter::format_converted_name(&converted)
                ));
            }
        }
        None => print_warning(format!(
            "No mapping for line {} offset {}",
            line, args.offset
        )),
    }

    if failures > 0 {
        print_warning(format!("{} mapping(s) could not be decoded", failures));
    }
    Ok(())
}

/// Execute the files command
pub fn files(mut args: FilesArgs, settings: &Settings) -> Result<()> {
    args.output.merge_settings(settings);
    let line = validate_line(args.line)?;
    let (map, _) = open_map(&args.map, settings)?;
    let files = map.files_for_line(line).map(<[String]>::to_vec);

    if args.output.json {
        return print_json(&CommandOutput::ok(files));
    }

    match files {
        Some(files) if !files.is_empty() => {
            print_info(format!("Line {} was generated from:", line));
            for file in files {
                println!("  {}", file);
            }
        }
        Some(_) => print_warning(format!("Line {} has no original files", line)),
        None => print_warning(format!(
            "Line {} is outside the map ({} lines)",
            line,
            map.line_count()
        )),
    }
    Ok(())
}

/// Execute the reverse command
pub fn reverse(mut args: ReverseArgs, settings: &Settings) -> Result<()> {
    args.output.merge_settings(settings);
    let line = validate_line(args.line)?;

    let loader = FsLoader::new();
    let mut modules = ModuleContext::new();
    let mut errors = Vec::new();
    for path in &args.map {
        let url = path.to_string_lossy();
        if !modules.add_module_from(&loader, url.as_ref(), &url) {
            errors.push(format!("Could not open line map {}", url));
        }
    }

    let mut registry = MapperRegistry::new();
    registry.register(Mapper::Modules(modules));
    let hits = registry.generated_lines_for(&args.file, line);

    if args.output.json {
        let mut output = CommandOutput::ok(hits);
        if !errors.is_empty() {
            output.errors = Some(errors);
        }
        return print_json(&output);
    }

    for error in &errors {
        print_warning(error);
    }
    if hits.is_empty() {
        print_warning(format!("No generated lines for {}:{}", args.file, line));
    } else {
        print_info(format!("{}:{} maps to:", args.file, line));
        for hit in &hits {
            println!("  {}", Formatter::format_location(hit));
        }
    }
    Ok(())
}

/// Execute the name command
pub fn name(mut args: NameArgs, settings: &Settings) -> Result<()> {
    args.output.merge_settings(settings);
    let converted = convert_name(&args.value, args.property);

    if args.output.json {
        return print_json(&CommandOutput::ok(converted));
    }
    println!("{}", Formatter::format_converted_name(&converted));
    Ok(())
}

/// Execute the interactive command
pub fn interactive(args: InteractiveArgs, settings: &Settings) -> Result<()> {
    let (map, map_path) = open_map(&args.map, settings)?;
    start_repl(ReplConfig {
        map_path: map_path.into(),
        map,
    })
}

/// Execute a context subcommand, saving settings when they change
pub fn context(command: ContextCommand, settings: &mut Settings, path: &Path) -> Result<()> {
    match command {
        ContextCommand::Set(args) => {
            let mut changed = false;
            if let Some(map) = args.source_map {
                changed |= settings.set_for_context(&args.url, ContextKey::SourceMap, Some(map));
            }
            if let Some(root) = args.root_path {
                changed |= settings.set_for_context(&args.url, ContextKey::RootPath, Some(root));
            }
            if changed {
                settings.save(path)?;
                print_success(format!("Settings for {} saved to {}", args.url, path.display()));
            } else {
                print_info("Nothing to change");
            }
        }
        ContextCommand::Show(args) => match settings.context(&args.url) {
            Some(block) => {
                print_info(format!("Settings for {}", block.url));
                println!(
                    "  source map: {}",
                    block.source_map.as_deref().unwrap_or("<none>")
                );
                println!(
                    "  root path: {}",
                    block.root_path.as_deref().unwrap_or("<none>")
                );
            }
            None => print_warning(format!("No settings stored for {}", args.url)),
        },
        ContextCommand::Clear(args) => {
            if CompilerContext::new(args.url.clone()).clear_source_map(settings) {
                settings.save(path)?;
                print_success(format!("Cleared line map for {}", args.url));
            } else {
                print_info(format!("No line map stored for {}", args.url));
            }
        }
    }
    Ok(())
}
