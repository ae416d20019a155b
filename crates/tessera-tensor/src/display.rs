//! Display - Diagnostic Rendering for Tensors
//!
//! Output is meant for humans and logs; nothing should parse it.
//!
//! @version 0.1.0
//! @author Tessera Development Team

use core::fmt::{self, Write};

use tessera_core::dtype::{DType, Scalar};

use crate::tensor::Tensor;
use crate::view::{TensorData, TensorView};

// =============================================================================
// Rendering
// =============================================================================

/// Number of leading elements shown in the data preview.
pub const PREVIEW_LIMIT: usize = 10;

/// Writes a multi-line summary of `tensor` to `out`.
///
/// ```text
/// Tensor {
///   dtype: float32
///   shape: [2, 3]
///   requires_grad: false
///   size: 6
///   memory: 24 bytes
///   ref_count: 1
///   data: [0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000]
/// }
/// ```
pub fn render<D, W>(title: &str, tensor: &D, out: &mut W) -> fmt::Result
where
    D: TensorData + ?Sized,
    W: Write + ?Sized,
{
    writeln!(out, "{title} {{")?;
    writeln!(out, "  dtype: {}", tensor.dtype())?;
    writeln!(out, "  shape: {}", tensor.shape())?;
    writeln!(out, "  requires_grad: {}", tensor.requires_grad())?;
    writeln!(out, "  size: {}", tensor.numel())?;
    writeln!(out, "  memory: {} bytes", tensor.byte_size())?;
    if let Some(count) = tensor.ref_count() {
        writeln!(out, "  ref_count: {count}")?;
    }
    write!(out, "  data: ")?;
    write_preview(tensor, out)?;
    writeln!(out)?;
    write!(out, "}}")
}

fn write_preview<D, W>(tensor: &D, out: &mut W) -> fmt::Result
where
    D: TensorData + ?Sized,
    W: Write + ?Sized,
{
    match tensor.dtype() {
        DType::F32 => write_elements::<f32, _, _, _>(tensor, out, |v, o| write!(o, "{v:.4}")),
        DType::F64 => write_elements::<f64, _, _, _>(tensor, out, |v, o| write!(o, "{v:.4}")),
        DType::I32 => write_elements::<i32, _, _, _>(tensor, out, |v, o| write!(o, "{v}")),
        DType::I64 => write_elements::<i64, _, _, _>(tensor, out, |v, o| write!(o, "{v}")),
        DType::U8 => write_elements::<u8, _, _, _>(tensor, out, |v, o| write!(o, "{v}")),
    }
}

fn write_elements<T, D, W, F>(tensor: &D, out: &mut W, item: F) -> fmt::Result
where
    T: Scalar,
    D: TensorData + ?Sized,
    W: Write + ?Sized,
    F: Fn(T, &mut W) -> fmt::Result,
{
    // Borrowed bytes may be misaligned for T; read them unaligned.
    let width = core::mem::size_of::<T>();
    let bytes = tensor.as_bytes();
    let shown = tensor.numel().min(PREVIEW_LIMIT);

    write!(out, "[")?;
    for (i, chunk) in bytes.chunks_exact(width).take(shown).enumerate() {
        if i > 0 {
            write!(out, ", ")?;
        }
        item(bytemuck::pod_read_unaligned::<T>(chunk), out)?;
    }
    if tensor.numel() > PREVIEW_LIMIT {
        write!(out, ", ...")?;
    }
    write!(out, "]")
}

// =============================================================================
// Formatting Traits
// =============================================================================

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render("Tensor", self, f)
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tensor(shape={}, dtype={}, requires_grad={}, ref_count={}",
            self.shape(),
            self.dtype(),
            self.requires_grad(),
            self.ref_count()
        )?;
        if let Some(node) = self.grad_fn() {
            write!(f, ", grad_fn={node}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for TensorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render("TensorView", self, f)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_float() {
        let t = Tensor::from_slice(&[1.0_f32, 2.5, -3.0], &[3], false).unwrap();
        let text = t.to_string();
        assert!(text.starts_with("Tensor {\n"));
        assert!(text.contains("  dtype: float32\n"));
        assert!(text.contains("  shape: [3]\n"));
        assert!(text.contains("  memory: 12 bytes\n"));
        assert!(text.contains("  ref_count: 1\n"));
        assert!(text.contains("  data: [1.0000, 2.5000, -3.0000]\n"));
        assert!(text.ends_with('}'));
    }

    #[test]
    fn test_render_truncates() {
        let t = Tensor::ones(&[3, 4], DType::I32, true).unwrap();
        let text = t.to_string();
        assert!(text.contains("requires_grad: true"));
        assert!(text.contains("data: [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, ...]"));
    }

    #[test]
    fn test_render_view_has_no_ref_count() {
        let raw = [5_u8, 6];
        let view = TensorView::new(&raw, &[2], DType::U8).unwrap();
        let text = view.to_string();
        assert!(text.starts_with("TensorView {"));
        assert!(!text.contains("ref_count"));
        assert!(text.contains("data: [5, 6]"));
    }

    #[test]
    fn test_debug_is_compact() {
        let t = Tensor::zeros(&[2, 2], DType::F64, false).unwrap();
        assert_eq!(
            format!("{t:?}"),
            "Tensor(shape=[2, 2], dtype=float64, requires_grad=false, ref_count=1)"
        );
    }
}
