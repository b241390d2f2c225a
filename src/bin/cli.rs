//! zumo-cli
//!
//! Connects to a robot, runs one command and prints the result.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use zumolink::protocol::{Proximity, Response, SensorSnapshot};
use zumolink::transport::SerialTransport;
use zumolink::{Connection, LinkConfig, Robot};

/// Zumo 32U4 command-line client
#[derive(Parser, Debug)]
#[command(name = "zumo-cli")]
#[command(about = "Send commands to a Zumo robot over serial")]
#[command(version)]
struct Args {
    /// Serial device (e.g. /dev/ttyACM0)
    #[arg(short, long)]
    port: String,

    /// Baud rate
    #[arg(short, long, default_value = "9600")]
    baud: u32,

    /// Read timeout in milliseconds
    #[arg(short, long, default_value = "2000")]
    timeout_ms: u64,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the robot's identity
    Id,

    /// Drive forward at speed 0-9
    Forward {
        #[arg(default_value = "2")]
        speed: u8,
    },

    /// Drive backward at speed 0-9
    Backward {
        #[arg(default_value = "2")]
        speed: u8,
    },

    /// Turn left at speed 0-9
    Left {
        #[arg(default_value = "2")]
        speed: u8,
    },

    /// Turn right at speed 0-9
    Right {
        #[arg(default_value = "2")]
        speed: u8,
    },

    /// Stop both motors
    Stop,

    /// Set raw wheel speeds
    Speeds {
        #[arg(allow_hyphen_values = true)]
        left: i16,
        #[arg(allow_hyphen_values = true)]
        right: i16,
    },

    /// Sound the buzzer
    Buzz {
        #[arg(default_value = "1")]
        count: u8,
    },

    /// Set an LED
    Led { color: LedColor, value: u8 },

    /// Read an encoder (L or R)
    Encoder { side: char },

    /// Read both encoders
    Encoders,

    /// Read a proximity sensor (L, F or R)
    Proximity { direction: char },

    /// Read the accelerometer
    Accel,

    /// Read the magnetometer
    Mag,

    /// Read the gyroscope
    Gyro,

    /// Read the battery level
    Battery,

    /// Read every sensor
    Sensors,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LedColor {
    Yellow,
    Green,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,zumolink=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match LinkConfig::builder(&args.port)
        .baud_rate(args.baud)
        .read_timeout_ms(args.timeout_ms)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    let mut conn: Connection<SerialTransport> = Connection::new(config);
    if let Err(e) = conn.connect() {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    let result = match conn.robot() {
        Ok(mut robot) => run(&mut robot, &args.command),
        Err(e) => Err(e),
    };
    conn.close();

    match result {
        Ok(Some(output)) => print(&output, args.json),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Output {
    Response(Response),
    Snapshot(SensorSnapshot),
}

fn run(
    robot: &mut Robot<'_, SerialTransport>,
    command: &Commands,
) -> zumolink::Result<Option<Output>> {
    let response = match *command {
        Commands::Id => Response::Identity(robot.identity().to_string()),
        Commands::Forward { speed } => return robot.forward(speed).map(|_| None),
        Commands::Backward { speed } => return robot.backward(speed).map(|_| None),
        Commands::Left { speed } => return robot.turn_left(speed).map(|_| None),
        Commands::Right { speed } => return robot.turn_right(speed).map(|_| None),
        Commands::Stop => return robot.stop().map(|_| None),
        Commands::Speeds { left, right } => return robot.set_speeds(left, right).map(|_| None),
        Commands::Buzz { count } => return robot.buzz(count).map(|_| None),
        Commands::Led { color: LedColor::Yellow, value } => {
            return robot.led_yellow(value).map(|_| None)
        }
        Commands::Led { color: LedColor::Green, value } => {
            return robot.led_green(value).map(|_| None)
        }
        Commands::Encoder { side } => Response::Int16(robot.encoder(side.to_ascii_uppercase())?),
        Commands::Encoders => {
            let (left, right) = robot.encoders()?;
            Response::Int16Pair(left, right)
        }
        Commands::Proximity { direction } => {
            Response::Proximity(robot.proximity(direction.to_ascii_uppercase())?)
        }
        Commands::Accel => Response::Int16Triple(robot.compass_acceleration()?),
        Commands::Mag => Response::Int16Triple(robot.compass_magnetic()?),
        Commands::Gyro => Response::Int16Triple(robot.gyro()?),
        Commands::Battery => Response::Int16(robot.battery()?),
        Commands::Sensors => return robot.snapshot().map(|s| Some(Output::Snapshot(s))),
    };

    Ok(Some(Output::Response(response)))
}

fn print(output: &Output, json: bool) {
    if json {
        match serde_json::to_string(output) {
            Ok(s) => println!("{}", s),
            Err(e) => tracing::error!("Failed to serialize output: {}", e),
        }
        return;
    }

    match output {
        Output::Response(Response::Identity(id)) => println!("{}", id),
        Output::Response(Response::Int16(v)) => println!("{}", v),
        Output::Response(Response::Int16Pair(l, r)) => println!("{} {}", l, r),
        Output::Response(Response::Int16Triple(v)) => println!("{} {} {}", v.x, v.y, v.z),
        Output::Response(Response::Proximity(p)) => match p {
            Proximity::Side(v) => println!("{}", v),
            Proximity::Front { left, right } => println!("{} {}", left, right),
        },
        Output::Snapshot(s) => {
            println!("Encoders: {:?}", s.encoders);
            println!(
                "Proximities: ({}, {:?}, {})",
                s.proximity_left, s.proximity_front, s.proximity_right
            );
            println!("Angular velocities: ({}, {}, {})", s.gyro.x, s.gyro.y, s.gyro.z);
            println!("Compass: ({}, {}, {})", s.magnetic.x, s.magnetic.y, s.magnetic.z);
            println!(
                "Acceleration: ({}, {}, {})",
                s.acceleration.x, s.acceleration.y, s.acceleration.z
            );
            println!("Batteries: {}", s.battery);
        }
    }
}
