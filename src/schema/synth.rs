use log::{info, warn};

use crate::capability::{Arg, CapabilityHandle, ParamShape, ReceiveHandler};
use crate::schema::cue::{StrikeCue, CUE_WIRE_BYTES, CUE_WIRE_NAME};
use crate::schema::error::{SendError, SynthesisError};
use crate::wire::{PacketReader, PacketWriter, WireSerde};

/// The process-wide binding of [`StrikeCue`] to the transport's byte-level
/// contract. Built at most once; sessions share the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaHandle {
    wire_name: &'static str,
    wire_bytes: usize,
}

impl SchemaHandle {
    /// Selects and self-checks the cue adapter.
    ///
    /// The self-check encodes a probe value and decodes it back; any
    /// disagreement means the schema must not be put on the wire.
    pub fn build() -> Result<Self, SynthesisError> {
        let probe = StrikeCue::new(1.5, -2.25, 1024.125);

        let mut writer = PacketWriter::new();
        probe.ser(&mut writer);
        let bytes = writer.to_bytes();

        if bytes.len() != CUE_WIRE_BYTES {
            return Err(SynthesisError::SelfCheckFailed {
                reason: format!(
                    "encoded {} byte(s), expected {}",
                    bytes.len(),
                    CUE_WIRE_BYTES
                ),
            });
        }

        let mut reader = PacketReader::new(&bytes);
        match StrikeCue::de(&mut reader) {
            Ok(decoded) if decoded == probe => {}
            Ok(decoded) => {
                return Err(SynthesisError::SelfCheckFailed {
                    reason: format!("decoded {decoded:?} from {probe:?}"),
                });
            }
            Err(error) => {
                return Err(SynthesisError::SelfCheckFailed {
                    reason: error.to_string(),
                });
            }
        }

        info!("Cue schema ready: {CUE_WIRE_NAME:?} ({CUE_WIRE_BYTES} bytes)");

        Ok(Self {
            wire_name: CUE_WIRE_NAME,
            wire_bytes: CUE_WIRE_BYTES,
        })
    }

    pub fn wire_name(&self) -> &'static str {
        self.wire_name
    }

    pub fn wire_bytes(&self) -> usize {
        self.wire_bytes
    }

    /// Encodes a cue for the wire.
    pub fn encode(&self, cue: &StrikeCue) -> Vec<u8> {
        let mut writer = PacketWriter::new();
        cue.ser(&mut writer);
        writer.to_bytes()
    }

    /// Wraps a typed callback into the byte-level handler the transport
    /// expects. Undecodable payloads are logged and dropped.
    pub fn receive_adapter(
        &self,
        on_receive: impl Fn(StrikeCue) + Send + Sync + 'static,
    ) -> ReceiveHandler {
        Box::new(move |payload: &[u8]| {
            let mut reader = PacketReader::new(payload);
            match StrikeCue::de(&mut reader) {
                Ok(cue) => on_receive(cue),
                Err(error) => {
                    warn!(
                        "Dropping undecodable cue payload ({} byte(s)): {error}",
                        payload.len()
                    );
                }
            }
        })
    }
}

/// Installs the schema's receive adapter at the binding's register entry
/// point.
pub fn install_receiver(
    schema: &SchemaHandle,
    handle: &CapabilityHandle,
    on_receive: impl Fn(StrikeCue) + Send + Sync + 'static,
) -> Result<(), SynthesisError> {
    let Some(entry) = handle.receive_register() else {
        return Err(SynthesisError::ReceiveUnbound);
    };
    let adapter = schema.receive_adapter(on_receive);
    handle
        .subsystem()
        .install_receiver(entry, schema.wire_name(), adapter)
        .map_err(|error| SynthesisError::ReceiverInstallFailed {
            entry: entry.to_string(),
            reason: error.to_string(),
        })
}

/// A resolved send operation: the entry point plus one synthesized default
/// argument per non-payload parameter slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SenderHandle {
    entry: String,
    args: Vec<Arg>,
}

impl SenderHandle {
    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }
}

/// Resolves the binding's send entry point and synthesizes default
/// arguments from its declared parameter shapes.
///
/// Mode slots prefer a reliable-ordered delivery variant, then any
/// reliable variant, then the first declared; flags default on, scalars to
/// zero, and opaque slots are marked absent for the subsystem to default.
pub fn resolve_sender(handle: &CapabilityHandle) -> Result<SenderHandle, SynthesisError> {
    let Some(entry) = handle.broadcast_send() else {
        return Err(SynthesisError::SendUnbound);
    };

    let declarations = handle.subsystem().entry_points();
    let Some(decl) = declarations.iter().find(|decl| decl.name == entry) else {
        return Err(SynthesisError::SendUnbound);
    };

    let mut args = Vec::new();
    let mut payload_seen = false;
    for shape in &decl.params {
        if !payload_seen && matches!(shape, ParamShape::Payload) {
            // The payload slot is filled at call time.
            payload_seen = true;
            continue;
        }
        args.push(default_arg(shape));
    }

    Ok(SenderHandle {
        entry: entry.to_string(),
        args,
    })
}

/// Encodes and broadcasts a cue through a resolved sender.
pub fn send_cue(
    schema: &SchemaHandle,
    handle: &CapabilityHandle,
    sender: &SenderHandle,
    cue: &StrikeCue,
) -> Result<(), SendError> {
    let payload = schema.encode(cue);
    handle
        .subsystem()
        .send(sender.entry(), schema.wire_name(), &payload, sender.args())
        .map_err(|error| SendError::Rejected {
            entry: sender.entry().to_string(),
            reason: error.to_string(),
        })
}

fn default_arg(shape: &ParamShape) -> Arg {
    match shape {
        ParamShape::Mode { variants } => Arg::Mode(preferred_mode(variants)),
        ParamShape::Flag => Arg::Flag(true),
        ParamShape::Scalar => Arg::Scalar(0.0),
        ParamShape::Payload | ParamShape::Callback | ParamShape::Opaque(_) => Arg::Absent,
    }
}

/// Index of the delivery mode to default to: exact "reliableordered"
/// first, then any reliable (but not unreliable) variant, then the first
/// declared.
fn preferred_mode(variants: &[String]) -> usize {
    let lowered: Vec<String> = variants.iter().map(|variant| variant.to_lowercase()).collect();

    if let Some(index) = lowered.iter().position(|variant| variant == "reliableordered") {
        return index;
    }
    if let Some(index) = lowered
        .iter()
        .position(|variant| variant.contains("reliable") && !variant.contains("unreliable"))
    {
        return index;
    }
    0
}
