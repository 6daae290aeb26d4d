//! Format registry
//!
//! Decoders are tried in a fixed order: XM, then SymMOD.

use fox_core::{DecodeContext, DecodeError, Decoded, FormatDecoder, NoTrace, TraceSink};
use fox_symmod::SymModDecoder;
use fox_xm::XmDecoder;

use crate::{Module, ParseOptions};

/// Object-safe view of a [`FormatDecoder`] producing a tagged [`Module`]
trait ModuleDecoder {
    fn format_name(&self) -> &'static str;

    fn decode_module(
        &self,
        data: &[u8],
        ctx: &mut DecodeContext<'_>,
    ) -> Result<Decoded<Module>, DecodeError>;
}

impl<D> ModuleDecoder for D
where
    D: FormatDecoder,
    D::Module: Into<Module>,
{
    fn format_name(&self) -> &'static str {
        self.name()
    }

    fn decode_module(
        &self,
        data: &[u8],
        ctx: &mut DecodeContext<'_>,
    ) -> Result<Decoded<Module>, DecodeError> {
        Ok(self.decode(data, ctx)?.map(Into::into))
    }
}

const DECODERS: [&dyn ModuleDecoder; 2] = [&XmDecoder, &SymModDecoder];

/// Format names in the order decoders are tried
pub fn decoder_names() -> Vec<&'static str> {
    DECODERS.iter().map(|d| d.format_name()).collect()
}

/// Parse a module of any supported format with default options
pub fn parse(data: &[u8]) -> Result<Module, DecodeError> {
    parse_with(data, &ParseOptions::default(), &mut NoTrace)
}

/// Parse a module of any supported format
///
/// Every decoded item of the matching decoder (and of any decoder that read
/// past its signature) is reported to `sink`.
pub fn parse_with(
    data: &[u8],
    options: &ParseOptions,
    sink: &mut dyn TraceSink,
) -> Result<Module, DecodeError> {
    options.check_input_len(data.len())?;

    let mut ctx = DecodeContext::new(sink);
    for decoder in DECODERS {
        let format = decoder.format_name();
        tracing::debug!(format, len = data.len(), "trying decoder");

        match decoder.decode_module(data, &mut ctx) {
            Ok(Decoded::Matched(module)) => {
                tracing::debug!(format, "module decoded");
                return Ok(module);
            }
            Ok(Decoded::Mismatch) => {
                tracing::debug!(format, "signature mismatch");
            }
            Err(e) => {
                tracing::debug!(format, error = %e, "decoder failed");
                return Err(e);
            }
        }
    }

    Err(DecodeError::UnrecognizedFormat)
}
