use std::{
    io::BufRead,
    sync::Arc,
};

use adsbee_adsb::{
    AtomicStatistics,
    ExtendedSquitterFrame,
    RawMessage,
    Translator,
    cpr::{
        self,
        CprCoordinate,
        CprFormat,
        CprResolution,
        GlobalCoordinate,
    },
};
use clap::{
    Parser,
    Subcommand,
};
use color_eyre::eyre::{
    Error,
    OptionExt,
    bail,
};

fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    match args.command {
        Command::Decode {
            frames,
            receiver,
            statistics,
        } => {
            decode(frames, receiver.position(), statistics)?;
        }
        Command::Cpr { command } => {
            match command {
                CprCommand::Encode {
                    latitude,
                    longitude,
                    odd,
                    bits,
                } => {
                    let cpr = cpr::encode(
                        GlobalCoordinate::new(latitude, longitude),
                        CprFormat::from_bit(odd),
                        resolution(bits)?,
                    );
                    println!("{} {}", cpr.lat_cpr(), cpr.lon_cpr());
                }
                CprCommand::Local {
                    lat_cpr,
                    lon_cpr,
                    odd,
                    bits,
                    receiver,
                } => {
                    let cpr = coordinate(lat_cpr, lon_cpr, CprFormat::from_bit(odd), bits)?;
                    let reference = receiver
                        .position()
                        .ok_or_eyre("A reference position is needed for local decoding")?;
                    let position = cpr::local_decode(cpr, reference);
                    println!("{} {}", position.latitude, position.longitude);
                }
                CprCommand::Global {
                    even,
                    odd,
                    later_odd,
                    bits,
                    receiver,
                } => {
                    let even = coordinate(even[0], even[1], CprFormat::Even, bits)?;
                    let odd = coordinate(odd[0], odd[1], CprFormat::Odd, bits)?;
                    let (early, later) = if later_odd { (even, odd) } else { (odd, even) };
                    match cpr::global_decode(early, later, receiver.position()) {
                        Some(position) => println!("{} {}", position.latitude, position.longitude),
                        None => bail!("Positions can't be decoded globally"),
                    }
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode extended squitter frames given as hex.
    ///
    /// Reads one frame per line from stdin if no frames are given.
    Decode {
        frames: Vec<String>,

        #[clap(flatten)]
        receiver: ReceiverArgs,

        /// Print message counts at the end.
        #[clap(short, long)]
        statistics: bool,
    },
    Cpr {
        #[clap(subcommand)]
        command: CprCommand,
    },
}

#[derive(Debug, Subcommand)]
enum CprCommand {
    /// Encode a position. Prints the encoded latitude and longitude.
    Encode {
        #[clap(long, allow_hyphen_values = true)]
        latitude: f64,

        #[clap(long, allow_hyphen_values = true)]
        longitude: f64,

        /// Use the odd format instead of even.
        #[clap(long)]
        odd: bool,

        /// One of 12, 14, 17 or 19
        #[clap(short, long, default_value = "17")]
        bits: u8,
    },
    /// Decode a position using the receiver position as reference.
    Local {
        lat_cpr: u32,

        lon_cpr: u32,

        #[clap(long)]
        odd: bool,

        #[clap(short, long, default_value = "17")]
        bits: u8,

        #[clap(flatten)]
        receiver: ReceiverArgs,
    },
    /// Decode a pair of positions.
    Global {
        /// Encoded latitude and longitude of the even message
        #[clap(long, num_args = 2, required = true)]
        even: Vec<u32>,

        /// Encoded latitude and longitude of the odd message
        #[clap(long, num_args = 2, required = true)]
        odd: Vec<u32>,

        /// The odd message was received last. Otherwise the even one was.
        #[clap(long)]
        later_odd: bool,

        #[clap(short, long, default_value = "17")]
        bits: u8,

        #[clap(flatten)]
        receiver: ReceiverArgs,
    },
}

#[derive(Debug, clap::Args)]
struct ReceiverArgs {
    #[clap(long, env = "RECEIVER_LATITUDE", allow_hyphen_values = true)]
    receiver_latitude: Option<f64>,

    #[clap(long, env = "RECEIVER_LONGITUDE", allow_hyphen_values = true)]
    receiver_longitude: Option<f64>,
}

impl ReceiverArgs {
    fn position(&self) -> Option<GlobalCoordinate> {
        Some(GlobalCoordinate::new(
            self.receiver_latitude?,
            self.receiver_longitude?,
        ))
    }
}

fn resolution(bits: u8) -> Result<CprResolution, Error> {
    CprResolution::from_number_of_bits(bits)
        .ok_or_eyre("Number of bits must be one of 12, 14, 17 or 19")
}

fn coordinate(
    lat_cpr: u32,
    lon_cpr: u32,
    format: CprFormat,
    bits: u8,
) -> Result<CprCoordinate, Error> {
    resolution(bits)?;
    CprCoordinate::new(lat_cpr, lon_cpr, format, bits)
        .ok_or_eyre("Encoded position doesn't fit into the number of bits")
}

fn decode(
    frames: Vec<String>,
    receiver: Option<GlobalCoordinate>,
    print_statistics: bool,
) -> Result<(), Error> {
    let statistics = Arc::new(AtomicStatistics::default());
    let translator = Translator::builder()
        .statistics(statistics.clone())
        .build()?;

    let handle_frame = |hex: &str| -> Result<(), Error> {
        let hex = hex.trim();
        if hex.is_empty() {
            return Ok(());
        }

        let frame = match ExtendedSquitterFrame::from_hex(hex) {
            Ok(frame) => frame,
            Err(error) => {
                tracing::warn!(%hex, %error, "skipping frame");
                return Ok(());
            }
        };

        match translator.translate(&RawMessage::from(frame)) {
            Some(message) => {
                println!("{message:#?}");
                if let (Some(cpr), Some(receiver)) = (message.cpr(), receiver) {
                    let position = cpr::local_decode(cpr, receiver);
                    println!("position: {} {}", position.latitude, position.longitude);
                }
            }
            None => println!("{hex}: no ADS-B message"),
        }

        Ok(())
    };

    if frames.is_empty() {
        for line in std::io::stdin().lock().lines() {
            handle_frame(&line?)?;
        }
    }
    else {
        for frame in &frames {
            handle_frame(frame)?;
        }
    }

    if print_statistics {
        let snapshot = statistics.snapshot();
        println!("{} messages", snapshot.total);
        for (message_format, count) in snapshot.message_formats() {
            println!("{message_format:?}: {count}");
        }
    }

    Ok(())
}
