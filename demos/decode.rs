use url_defense_decoder::Decoder;
use url_defense_decoder::helpers::html_unescape;
use log::LevelFilter;
use std::io::Read;

// cargo run --example decode -- [-s|--strict] [-v|--verbose] [URL...]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut strict = false;
    let mut verbose = false;
    let mut urls = Vec::new();
    
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-s" | "--strict" => strict = true,
            "-v" | "--verbose" => verbose = true,
            _ => urls.push(arg),
        }
    }
    
    simple_logging::log_to_stderr(if verbose { LevelFilter::Debug } else { LevelFilter::Warn });
    
    let decoder = Decoder::builder()
        .strict(strict)
        .build();
    
    if urls.is_empty() {
        let mut text = String::new();
        
        std::io::stdin().read_to_string(&mut text)?;
        
        for outcome in decoder.decode_lines(&text) {
            match outcome.result {
                Ok(decoded) => println!("{decoded}"),
                Err(error) => eprintln!("failed to decode {:?}: {error}", outcome.input),
            }
        }
        
        return Ok(());
    }
    
    for url in urls {
        let url = html_unescape(&url);
        
        match decoder.decode(&url) {
            Ok(decoded) => println!("{decoded}"),
            Err(error) => eprintln!("failed to decode {url:?}: {error}"),
        }
    }
    
    Ok(())
}
