#[cfg(feature = "examples")]
fn main() -> anyhow::Result<()> {
    use bytes::{BufMut, BytesMut};
    use rtpmidi_journal::packets::midi_packets::recovery_journal::recovery_journal::RecoveryJournal;
    use rtpmidi_journal::packets::midi_packets::recovery_journal::status::JournalStatus;
    use tracing::{Level, event};
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry().with(fmt::layer()).with(EnvFilter::from_default_env()).init();

    // one channel journal for channel 0 carrying chapters W and N
    let journal: &[u8] = &[
        0x20, 0x00, 0x01, // A, one channel, checkpoint 1
        0x00, 0x0C, 0x18, // channel 0, length 12, W and N
        0x00, 0x40, // chapter W
        0x02, 0x00, 0x3C, 0x7F, 0x40, 0x50, 0x00, // chapter N, two logs, one offbit octet
    ];

    let mut buffer = BytesMut::new();
    for byte in journal {
        buffer.put_u8(*byte);
        match JournalStatus::of(&buffer) {
            JournalStatus::MoreDataNeeded(needed) => event!(Level::INFO, available = buffer.len(), needed, "Waiting for more data"),
            JournalStatus::MalformedEncoding(reason) => anyhow::bail!("journal is malformed: {reason}"),
            JournalStatus::Success { consumed } => event!(Level::INFO, consumed, "Journal complete"),
        }
    }

    let decoded = RecoveryJournal::decode(&buffer)?;
    println!("{decoded:#?}");
    Ok(())
}

#[cfg(not(feature = "examples"))]
fn main() {
    println!("This example requires the 'examples' feature to be enabled.");
}
