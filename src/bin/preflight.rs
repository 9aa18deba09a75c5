use album_resource_server::{config, AlbumCollection, AlbumStore, JsonFileStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--init-if-missing]\n\
         \n\
         Reads env vars (all optional):\n\
           ALBUMS_BIND_ADDR, ALBUMS_DATA_FILE, ALBUMS_SERIALIZE_WRITES,\n\
           ALBUMS_FATAL_STORAGE_ERRORS, ALBUMS_SWAGGER_UI\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let init_if_missing = args.iter().any(|a| a == "--init-if-missing");

    let data_file = config::data_file();
    println!("> Preflight:");
    println!("  ALBUMS_BIND_ADDR={}", config::bind_addr());
    println!("  ALBUMS_DATA_FILE={}", data_file.display());
    println!("  ALBUMS_SERIALIZE_WRITES={}", config::serialize_writes());
    println!("  ALBUMS_FATAL_STORAGE_ERRORS={}", config::fatal_storage_errors());
    println!("  ALBUMS_SWAGGER_UI={}", config::swagger_ui());

    let store = JsonFileStore::new(&data_file);

    if init_if_missing {
        if store.ensure_exists(&AlbumCollection::default()).await? {
            println!("  Data file missing -> created with an empty collection.");
        }
    } else if tokio::fs::metadata(store.path()).await.is_err() {
        return Err(anyhow::anyhow!(
            "Data file {} does not exist. Re-run with --init-if-missing",
            data_file.display()
        ));
    }

    let albums = store.load().await?;
    println!("  Data file parses (ok). {} album(s) stored.", albums.len());

    println!("> Preflight OK.");
    Ok(())
}
