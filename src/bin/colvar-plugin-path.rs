use colvar::plugin;

pub fn main() {
    _main().unwrap_or_else(|e| {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    });
}

fn _main() -> Result<(), colvar::Error> {
    env_logger::init();

    let app = {
        clap::App::new("colvar-plugin-path")
            .about("Shows the path of the compiled colvar host-interface artifact.\n\n\
                Just run this with no arguments to see the path.")
    };
    let _ = app.get_matches();

    println!("{}", plugin::artifact_path()?.display());
    Ok(())
}
