//! # Formnest CLI
//!
//! Usage:
//!   formnest form.json -o form.html
//!   echo '{ ... }' | formnest
//!   formnest form.json --outline
//!   formnest --example > form.json
//!
//! Log verbosity comes from `FORMNEST_LOG` (default `warn`).

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "FORMNEST_LOG";

fn main() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    // Handle --example flag
    if args.iter().any(|a| a == "--example") {
        print!("{}", example_form_json());
        return;
    }

    // Read input
    let input = if let Some(path) = input_path(&args) {
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map(|_| buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))
    };
    let input = input.unwrap_or_else(|msg| fail(&msg));

    // Parse output path
    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone());
    let outline = args.iter().any(|a| a == "--outline");

    // Render
    let rendered = if outline {
        formnest::render_json_outline(&input)
    } else {
        formnest::render_json(&input)
    };
    let output = rendered.unwrap_or_else(|e| fail(&e.to_string()));

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                fail(&format!("Failed to write {}: {}", path, e));
            }
            eprintln!("✓ Written {} bytes to {}", output.len(), path);
        }
        None => println!("{}", output),
    }
}

/// The first argument that is neither a flag nor the value of `-o`.
fn input_path(args: &[String]) -> Option<&str> {
    args.iter()
        .enumerate()
        .skip(1)
        .find(|(i, arg)| !arg.starts_with('-') && args[i - 1] != "-o")
        .map(|(_, arg)| arg.as_str())
}

fn fail(message: &str) -> ! {
    eprintln!("✗ {}", message);
    process::exit(1);
}

fn example_form_json() -> &'static str {
    r##"{
  "layout": {
    "type": "divDecorator",
    "styleClass": "section",
    "delegate": {
      "type": "table",
      "tableStyleClass": "form",
      "numberOfColumns": 2,
      "columnStyleClasses": ["label", "field", "required"]
    }
  },
  "context": {
    "path": "person",
    "bundle": {
      "contactDetails": "Contact details"
    }
  },
  "facets": [
    {
      "name": "footer",
      "children": [
        { "tag": "button", "attributes": { "type": "submit" }, "text": "Save" }
      ]
    }
  ],
  "fields": [
    {
      "widget": { "tag": "input", "attributes": { "id": "firstName", "type": "text" } },
      "attributes": { "name": "firstName", "required": "true" }
    },
    {
      "widget": { "tag": "input", "attributes": { "id": "surname", "type": "text" } },
      "attributes": { "name": "surname", "required": "true" }
    },
    {
      "widget": { "tag": "textarea", "attributes": { "id": "notes" } },
      "attributes": { "name": "notes", "large": "true" }
    },
    {
      "widget": { "tag": "input", "attributes": { "id": "email", "type": "email" } },
      "attributes": { "name": "email", "section": "Contact Details" }
    },
    {
      "widget": { "tag": "input", "attributes": { "id": "phone", "type": "tel" } },
      "attributes": { "name": "phone" }
    },
    {
      "widget": { "tag": "input", "attributes": { "id": "street", "type": "text" } },
      "attributes": { "name": "street", "section": "Contact Details,Address" }
    },
    {
      "widget": { "tag": "input", "attributes": { "id": "newsletter", "type": "checkbox" } },
      "attributes": { "name": "newsletter", "label": "Send me the newsletter", "section": "" }
    }
  ]
}
"##
}
