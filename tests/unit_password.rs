use coursiva::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_password_success() {
    let password = "testpassword123";
    let hash = hash_password(password).unwrap();

    assert_ne!(hash, password);
    assert!(hash.starts_with("$2"));
}

#[test]
fn test_verify_correct_password() {
    let password = "testpassword123";
    let hash = hash_password(password).unwrap();

    assert!(verify_password(password, &hash).unwrap());
}

#[test]
fn test_verify_wrong_password() {
    let hash = hash_password("testpassword123").unwrap();

    assert!(!verify_password("wrongpassword", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let password = "testpassword123";
    let hash1 = hash_password(password).unwrap();
    let hash2 = hash_password(password).unwrap();

    assert_ne!(hash1, hash2);
}
