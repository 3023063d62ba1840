//! CLI tool to validate, format, and inspect qmldir files.

use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: qmldir <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  validate  Check qmldir file(s) for syntax errors");
        eprintln!("  fmt       Format qmldir file(s) and print to stdout");
        eprintln!("  info      Print the reduced module record");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  qmldir validate qmldir");
        eprintln!("  qmldir fmt qmldir");
        eprintln!("  qmldir info qmldir");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "validate" => {
                if !validate(path, &content) {
                    had_error = true;
                }
            }
            "fmt" => {
                let ast = qmldir_rs::parse(&content);
                if ast.has_errors() {
                    report_errors(path, &ast);
                    had_error = true;
                } else {
                    print!("{}", qmldir_rs::format(&ast));
                }
            }
            "info" => {
                let ast = qmldir_rs::parse(&content);
                report_errors(path, &ast);
                info(path, &qmldir_rs::reduce(&ast));
            }
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn validate(path: &str, content: &str) -> bool {
    let ast = qmldir_rs::parse(content);
    if ast.has_errors() {
        report_errors(path, &ast);
        return false;
    }
    let document = qmldir_rs::reduce(&ast);
    let resources = document.resources.len();
    let depends = document.depends.len();
    let plugin = if document.plugin.is_some() {
        ", plugin"
    } else {
        ""
    };
    eprintln!(
        "{path}: valid ({resources} resource(s), \
         {depends} dependency(ies){plugin})"
    );
    true
}

fn report_errors(path: &str, ast: &qmldir_rs::Ast) {
    for command in ast.syntax_errors() {
        if let qmldir_rs::CommandKind::SyntaxError { message, .. } = &command.kind {
            eprintln!("{path}: {message}");
        }
    }
}

fn info(path: &str, document: &qmldir_rs::Document) {
    println!("{path}:");
    if let Some(module) = &document.module_identifier {
        println!("  module: {module}");
    }
    if let Some(plugin) = &document.plugin {
        match &plugin.relative_path {
            Some(p) => println!("  plugin: {} ({})", plugin.name, p.display()),
            None => println!("  plugin: {}", plugin.name),
        }
    }
    if let Some(classname) = &document.classname {
        println!("  classname: {classname}");
    }
    if let Some(typeinfo) = &document.types_file_name {
        println!("  typeinfo: {typeinfo}");
    }
    for dependency in &document.depends {
        println!(
            "  depends: {} {}",
            dependency.name, dependency.initial_version
        );
    }
    for resource in &document.resources {
        let version = resource.initial_version.as_deref().unwrap_or("-");
        let mut flags = String::new();
        if resource.internal {
            flags.push_str(" [internal]");
        }
        if resource.singleton {
            flags.push_str(" [singleton]");
        }
        println!(
            "  type: {} {} {}{}",
            resource.name, version, resource.file_name, flags
        );
    }
    if document.designer_supported {
        println!("  designersupported");
    }
}
