use anyhow::Result;
use digitool_kml::classify;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// placemark name
	#[arg()]
	name: String,

	/// name of the enclosing folder
	#[arg(long, short, default_value = "")]
	folder: String,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	println!("{}", describe(&arguments.name, &arguments.folder));
	Ok(())
}

fn describe(name: &str, folder: &str) -> String {
	classify(name, folder).map_or_else(|| "unknown".to_string(), |layer_type| layer_type.to_string())
}
