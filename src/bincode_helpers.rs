// Helper macros for concise bincode implementations.
//
// Deriving the bincode traits is incompatible with constrained generic
// struct parameters (e.g. `struct BitBuf<Block: BitBlock>`), so the impls
// are written out; these macros keep them down to a field list. The field
// lists must be kept in sync with the struct definitions; the decode macros
// error on a mismatch, which is the reminder to update the encode macro too.
//
// The serialized field order is the order the fields are listed in, so the
// macro invocations double as the on-disk field-order documentation.

macro_rules! bincode_encode_impl {
    ($($t:ident),* $(,)?) => (
        fn encode<E: bincode::enc::Encoder>(
            &self,
            encoder: &mut E,
        ) -> core::result::Result<(), bincode::error::EncodeError> {
            $(bincode::Encode::encode(&self.$t, encoder)?;)*
            Ok(())
        }
    )
}

macro_rules! bincode_decode_impl {
    ($($t:ident),* $(,)?) => (
        fn decode<D: bincode::de::Decoder>(
            decoder: &mut D,
        ) -> core::result::Result<Self, bincode::error::DecodeError> {
            Ok(Self {
                $($t: bincode::Decode::decode(decoder)?,)*
            })
        }
    )
}

// Note: the macro assumes that the relevant generic lifetime is called 'de:
//   impl<'de> bincode::BorrowDecode<'de> for T { ... }
macro_rules! bincode_borrow_decode_impl {
    ($($t:ident),* $(,)?) => (
        fn borrow_decode<D: bincode::de::BorrowDecoder<'de>>(
            decoder: &mut D,
        ) -> core::result::Result<Self, bincode::error::DecodeError> {
            Ok(Self {
                $($t: bincode::BorrowDecode::borrow_decode(decoder)?,)*
            })
        }
    )
}

pub(crate) use bincode_borrow_decode_impl;
pub(crate) use bincode_decode_impl;
pub(crate) use bincode_encode_impl;
