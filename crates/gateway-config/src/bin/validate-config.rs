//! Configuration validation utility
//!
//! Usage: cargo run --bin validate-config config/gateway.toml

use std::env;
use std::process;

use gateway_config::ConfigLoader;

fn main() {
	let args: Vec<String> = env::args().collect();

	if args.len() != 2 {
		eprintln!("Usage: {} <config-file>", args[0]);
		process::exit(1);
	}

	let config_path = &args[1];

	println!("Validating configuration file: {}", config_path);

	match ConfigLoader::new().with_file(config_path).load() {
		Ok(config) => {
			println!("Configuration is valid");
			println!("Solver command: {}", config.solver.command);
			println!("Router: {}", config.solver.router);
			match config.active_profiles() {
				Some(profiles) => {
					for (profile, server) in profiles {
						println!("  {}: {}:{}", profile, server.host, server.port);
					}
				}
				None => println!("  no routing servers configured for this router"),
			}
			println!(
				"Listening on {}:{}{}",
				config.server.host, config.server.port, config.server.base_url
			);
			println!(
				"Limits: {} locations, {} vehicles",
				config.solver.max_locations, config.solver.max_vehicles
			);
		}
		Err(e) => {
			eprintln!("Configuration validation failed:");
			eprintln!("{}", e);
			process::exit(1);
		}
	}
}
