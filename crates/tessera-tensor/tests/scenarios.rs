//! End-to-end construction and lifetime scenarios.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tessera_tensor::{lifecycle, zeros, DType, Error, Tensor, TensorData, TensorOptions};

// =============================================================================
// Shape and Strides
// =============================================================================

#[test]
fn test_new_matrix_metadata() {
    let t = Tensor::new(&[2, 3], DType::F32, false).unwrap();
    assert_eq!(t.ndim(), 2);
    assert_eq!(t.numel(), 6);
    assert_eq!(t.strides(), &[3, 1]);
    assert_eq!(t.byte_size(), 24);
}

#[test]
fn test_new_rank3_strides() {
    let t = Tensor::new(&[2, 3, 4], DType::F32, false).unwrap();
    assert_eq!(t.strides(), &[12, 4, 1]);
    assert_eq!(t.numel(), 24);
}

#[test]
fn test_rank1_stride_is_one() {
    let t = Tensor::new(&[9], DType::I64, false).unwrap();
    assert_eq!(t.strides(), &[1]);
    assert_eq!(t.byte_size(), 72);
}

// =============================================================================
// Contents
// =============================================================================

#[test]
fn test_zeros_with_gradient() {
    let t = zeros(&[2, 2], DType::F32, true).unwrap();
    assert_eq!(t.as_slice::<f32>().unwrap(), &[0.0; 4]);

    let grad = t.grad().unwrap();
    assert_eq!(grad.as_slice::<f32>().unwrap(), &[0.0; 4]);
}

#[test]
fn test_from_data_preserves_order() {
    let values = [1.0_f32, 2.0, 3.0, 4.0];
    let t = Tensor::from_data(bytemuck::cast_slice(&values), &[2, 2], DType::F32, false).unwrap();
    assert_eq!(t.to_vec::<f32>().unwrap(), values);
    assert_eq!(t.get::<f32>(&[0, 1]).unwrap(), 2.0);
    assert_eq!(t.get::<f32>(&[1, 0]).unwrap(), 3.0);
}

#[test]
fn test_rand_respects_dtype_ranges() {
    let mut rng = StdRng::seed_from_u64(2024);
    let t = Tensor::rand(&[8, 8], DType::I32, false, &mut rng).unwrap();
    assert!(t.as_slice::<i32>().unwrap().iter().all(|v| (0..100).contains(v)));

    let t = Tensor::rand(&[8, 8], DType::F32, true, &mut rng).unwrap();
    assert!(t.as_slice::<f32>().unwrap().iter().all(|v| (0.0..1.0).contains(v)));
    assert!(t.grad().unwrap().as_bytes().iter().all(|&b| b == 0));
}

// =============================================================================
// Invalid Construction
// =============================================================================

#[test]
fn test_rank0_is_rejected() {
    for dtype in DType::ALL {
        assert!(matches!(
            Tensor::new(&[], dtype, true),
            Err(Error::InvalidShape { .. })
        ));
    }
}

#[test]
fn test_zero_extent_is_rejected() {
    let err = Tensor::ones(&[3, 0, 2], DType::U8, false).unwrap_err();
    assert!(matches!(err, Error::InvalidShape { .. }));
}

#[test]
fn test_unknown_dtype_is_recoverable() {
    assert!(matches!(DType::from_code(9), Err(Error::InvalidDType { .. })));
    assert!(matches!(
        "bfloat16".parse::<DType>(),
        Err(Error::InvalidDType { .. })
    ));
}

// =============================================================================
// Reference Counting
// =============================================================================

#[test]
fn test_last_release_tears_down() {
    let t = Tensor::zeros(&[4, 4], DType::F64, true).unwrap();
    let weak = t.downgrade();
    let handles: Vec<Tensor> = (0..3).map(|_| t.retain()).collect();
    assert_eq!(t.ref_count(), 4);

    t.release();
    for handle in handles {
        assert!(!weak.is_dropped());
        lifecycle::release(Some(handle));
    }
    assert!(weak.is_dropped());
}

#[test]
fn test_destroy_refuses_shared_tensor() {
    let t = Tensor::ones(&[2], DType::I32, false).unwrap();
    let other = lifecycle::retain(Some(&t)).unwrap();

    let t = t.destroy().unwrap_err();
    assert_eq!(other.to_vec::<i32>().unwrap(), vec![1, 1]);

    drop(other);
    assert!(lifecycle::destroy(Some(t)).is_ok());
}

#[test]
fn test_handles_move_across_threads() {
    let t = Tensor::ones(&[16], DType::I64, false).unwrap();
    let shared = t.retain();
    let sum = std::thread::spawn(move || shared.as_slice::<i64>().unwrap().iter().sum::<i64>())
        .join()
        .unwrap();
    assert_eq!(sum, 16);
    assert_eq!(t.ref_count(), 1);
}

// =============================================================================
// Options and Views
// =============================================================================

#[test]
fn test_options_from_toml() {
    let opts = TensorOptions::from_toml_str("dtype = \"int64\"\nrequires_grad = true\n").unwrap();
    let t = opts.zeros(&[3]).unwrap();
    assert_eq!(t.dtype(), DType::I64);
    assert!(t.requires_grad());
    assert_eq!(t.grad().unwrap().len(), 24);
}

#[test]
fn test_view_shares_owned_bytes() {
    let t = Tensor::from_slice(&[7_u8, 8, 9], &[3], false).unwrap();
    let view = t.view();
    assert_eq!(view.as_bytes().as_ptr(), t.as_bytes().as_ptr());
    assert_eq!(TensorData::byte_size(&view), 3);
}
