use crate::converter::{ConverterCache, ConverterConfig, ConverterConfigOption, ConverterError, TypedMessageConverter};
use crate::description::{
  BodyMemberDescription, CodecError, ContractType, DescriptionError, MessageContract, MessageContractAttribute,
};
use crate::formatter::{
  DataContractFormat, FormatOption, FormatterError, OperationFormatStyle, OperationFormatUse, XmlSerializerFormat,
};
use crate::message::{Envelope, MessageBody, MessageVersion, QualifiedName};
use rstest::rstest;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
  let _ = env::set_var("RUST_LOG", "debug");
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .try_init();
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Greeting {
  name: String,
}

impl MessageContract for Greeting {
  fn message_contract() -> Option<MessageContractAttribute> {
    Some(MessageContractAttribute::default())
  }

  fn body_members() -> Vec<BodyMemberDescription> {
    vec![BodyMemberDescription::new("name", std::any::type_name::<String>())]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Transfer {
  from: String,
  to: String,
  cents: u64,
  memo: Vec<String>,
}

impl MessageContract for Transfer {
  fn message_contract() -> Option<MessageContractAttribute> {
    Some(
      MessageContractAttribute::new()
        .with_wrapper_name("TransferRequest")
        .with_wrapper_namespace("urn:bank"),
    )
  }

  fn body_members() -> Vec<BodyMemberDescription> {
    vec![
      BodyMemberDescription::new("from", "String"),
      BodyMemberDescription::new("to", "String"),
      BodyMemberDescription::new("cents", "u64"),
      BodyMemberDescription::new("memo", "Vec<String>"),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Unmarked {
  value: i32,
}

impl MessageContract for Unmarked {
  fn body_members() -> Vec<BodyMemberDescription> {
    vec![BodyMemberDescription::new("value", "i32")]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Ambiguous {
  value: i32,
}

impl MessageContract for Ambiguous {
  fn message_contract() -> Option<MessageContractAttribute> {
    Some(MessageContractAttribute::default())
  }

  fn body_members() -> Vec<BodyMemberDescription> {
    vec![
      BodyMemberDescription::new("value", "i32"),
      BodyMemberDescription::new("value", "i32"),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
  name: String,
  nick: Option<String>,
  tags: Vec<String>,
}

impl MessageContract for Profile {
  fn message_contract() -> Option<MessageContractAttribute> {
    Some(MessageContractAttribute::default())
  }

  fn body_members() -> Vec<BodyMemberDescription> {
    vec![
      BodyMemberDescription::new("name", "String"),
      BodyMemberDescription::new("nick", "Option<String>"),
      BodyMemberDescription::new("tags", "Vec<String>"),
    ]
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Measurement {
  value: f64,
}

impl MessageContract for Measurement {
  fn message_contract() -> Option<MessageContractAttribute> {
    Some(MessageContractAttribute::default())
  }

  fn body_members() -> Vec<BodyMemberDescription> {
    vec![BodyMemberDescription::new("value", "f64")]
  }
}

fn profile(name: &str, nick: Option<&str>, tags: &[&str]) -> Profile {
  Profile {
    name: name.to_string(),
    nick: nick.map(str::to_string),
    tags: tags.iter().map(|tag| tag.to_string()).collect(),
  }
}

fn transfer() -> Transfer {
  Transfer {
    from: "alice".to_string(),
    to: "bob".to_string(),
    cents: 4_250,
    memo: vec!["rent".to_string(), "march".to_string()],
  }
}

fn xml_config() -> ConverterConfig {
  ConverterConfig::default().with_format(XmlSerializerFormat::default())
}

#[test]
fn test_greeting_scenario() {
  init_tracing();
  let converter = TypedMessageConverter::for_type::<Greeting>(Some("Hi"), &ConverterConfig::default()).unwrap();
  assert_eq!(converter.action(), Some("Hi"));

  let message = converter
    .to_message(Some(&Greeting {
      name: "Sam".to_string(),
    } as &dyn Any))
    .unwrap();
  assert_eq!(message.headers().action(), Some("Hi"));
  assert_eq!(message.version(), MessageVersion::SOAP12_WS_ADDRESSING10);

  let value = converter.from_message(&message).unwrap();
  let greeting = value.downcast_ref::<Greeting>().unwrap();
  assert_eq!(greeting.name, "Sam");
}

#[test]
fn test_mismatched_action_is_rejected_before_deserialization() {
  init_tracing();
  let converter = TypedMessageConverter::for_type::<Greeting>(Some("Hi"), &ConverterConfig::default()).unwrap();
  let mut message = converter
    .encode(&Greeting {
      name: "Sam".to_string(),
    })
    .unwrap();
  message.headers_mut().set_action(Some("Bye".to_string()));

  let err = converter.from_message(&message).unwrap_err();
  assert_eq!(
    err,
    ConverterError::ActionMismatch {
      expected: "Hi".to_string(),
      actual: "Bye".to_string(),
    }
  );

  // A body the formatter cannot read still reports the mismatch first.
  let unreadable = Envelope::new(MessageVersion::default(), MessageBody::Empty).with_action("Bye");
  assert!(matches!(
    converter.from_message(&unreadable).unwrap_err(),
    ConverterError::ActionMismatch { .. }
  ));

  // The converter remains usable afterwards.
  message.headers_mut().set_action(Some("Hi".to_string()));
  let greeting = converter.decode::<Greeting>(&message).unwrap();
  assert_eq!(greeting.name, "Sam");
}

#[rstest]
#[case::data_contract(ConverterConfig::default())]
#[case::xml_serializer(xml_config())]
fn test_action_mismatch_carries_both_actions(#[case] config: ConverterConfig) {
  let converter = TypedMessageConverter::for_type::<Transfer>(Some("urn:a"), &config).unwrap();
  let message = converter.encode(&transfer()).unwrap().with_action("urn:b");

  let err = converter.from_message(&message).unwrap_err();
  assert_eq!(
    err,
    ConverterError::ActionMismatch {
      expected: "urn:a".to_string(),
      actual: "urn:b".to_string(),
    }
  );

  let without_action = TypedMessageConverter::for_type::<Transfer>(None, &config).unwrap();
  assert_eq!(without_action.action(), None);
  assert_eq!(without_action.decode::<Transfer>(&message).unwrap(), transfer());
}

#[rstest]
#[case::data_contract_with_action(ConverterConfig::default(), Some("urn:bank/transfer"))]
#[case::data_contract_without_action(ConverterConfig::default(), None)]
#[case::xml_serializer_with_action(xml_config(), Some("urn:bank/transfer"))]
#[case::xml_serializer_without_action(xml_config(), None)]
#[case::data_contract_rpc(
  ConverterConfig::default().with_format(DataContractFormat::default().with_style(OperationFormatStyle::Rpc)),
  Some("urn:bank/transfer")
)]
#[case::xml_serializer_rpc_encoded(
  ConverterConfig::default().with_format(
    XmlSerializerFormat::default()
      .with_style(OperationFormatStyle::Rpc)
      .with_format_use(OperationFormatUse::Encoded)
  ),
  Some("urn:bank/transfer")
)]
fn test_round_trip(#[case] config: ConverterConfig, #[case] action: Option<&str>) {
  init_tracing();
  let converter = TypedMessageConverter::for_type::<Transfer>(action, &config).unwrap();
  let message = converter.encode(&transfer()).unwrap();

  assert_eq!(message.headers().action(), action);
  assert_eq!(converter.decode::<Transfer>(&message).unwrap(), transfer());
}

#[rstest]
#[case(MessageVersion::NONE)]
#[case(MessageVersion::SOAP11)]
#[case(MessageVersion::SOAP11_WS_ADDRESSING_AUGUST2004)]
#[case(MessageVersion::SOAP12)]
fn test_explicit_version_is_used(#[case] version: MessageVersion) {
  let converter = TypedMessageConverter::for_type::<Transfer>(Some("urn:a"), &xml_config()).unwrap();
  let message = converter.to_message_with_version(Some(&transfer() as &dyn Any), version).unwrap();

  assert_eq!(message.version(), version);
  assert_eq!(message.headers().action(), Some("urn:a"));
  assert_eq!(converter.decode::<Transfer>(&message).unwrap(), transfer());
}

#[test]
fn test_strategy_selects_body_kind() {
  let structural = TypedMessageConverter::for_type::<Transfer>(None, &ConverterConfig::default()).unwrap();
  let message = structural.encode(&transfer()).unwrap();
  assert!(matches!(
    message.body(),
    MessageBody::Structured { root: Some(root), .. } if *root == QualifiedName::new("TransferRequest", "urn:bank")
  ));

  let mapping = TypedMessageConverter::for_type::<Transfer>(None, &xml_config()).unwrap();
  let message = mapping.encode(&transfer()).unwrap();
  assert!(matches!(
    message.body(),
    MessageBody::Xml { root, xml } if root.name() == "TransferRequest" && xml.contains("<cents>4250</cents>")
  ));

  // Each formatter only reads its own body kind.
  assert!(matches!(
    structural.from_message(&message).unwrap_err(),
    ConverterError::Formatter(FormatterError::UnexpectedBody { .. })
  ));
}

#[test]
fn test_missing_contract_type_is_rejected() {
  let err = TypedMessageConverter::create(None, Some("a"), &ConverterConfig::default()).unwrap_err();
  assert_eq!(err, ConverterError::ArgumentMissing("contract_type"));

  let err = TypedMessageConverter::create(None, Some("a"), &xml_config()).unwrap_err();
  assert_eq!(err, ConverterError::ArgumentMissing("contract_type"));
}

#[test]
fn test_data_contract_requires_marker() {
  let config = ConverterConfig::default().with_format(DataContractFormat::default());
  let err = TypedMessageConverter::for_type::<Unmarked>(Some("a"), &config).unwrap_err();
  match err {
    ConverterError::ArgumentInvalid { argument, reason } => {
      assert_eq!(argument, "contract_type");
      assert!(reason.contains("Unmarked"));
      assert!(reason.contains("message contract"));
    }
    other => panic!("unexpected error: {other:?}"),
  }

  // The default format is the data contract format as well.
  let err = TypedMessageConverter::for_type::<Unmarked>(Some("a"), &ConverterConfig::default()).unwrap_err();
  assert!(matches!(err, ConverterError::ArgumentInvalid { .. }));
}

#[test]
fn test_xml_serializer_accepts_unmarked_types() {
  let converter = TypedMessageConverter::for_type::<Unmarked>(Some("a"), &xml_config()).unwrap();
  let message = converter.encode(&Unmarked { value: -3 }).unwrap();
  assert_eq!(converter.decode::<Unmarked>(&message).unwrap(), Unmarked { value: -3 });
}

#[test]
fn test_missing_value_is_rejected() {
  let converter = TypedMessageConverter::for_type::<Greeting>(Some("Hi"), &ConverterConfig::default()).unwrap();
  assert_eq!(
    converter.to_message(None).unwrap_err(),
    ConverterError::ArgumentMissing("typed_message")
  );
  assert_eq!(
    converter
      .to_message_with_version(None, MessageVersion::SOAP11)
      .unwrap_err(),
    ConverterError::ArgumentMissing("typed_message")
  );
}

#[test]
fn test_value_of_another_type_is_rejected() {
  let converter = TypedMessageConverter::for_type::<Greeting>(Some("Hi"), &ConverterConfig::default()).unwrap();
  let err = converter.to_message(Some(&transfer() as &dyn Any)).unwrap_err();
  assert!(matches!(
    err,
    ConverterError::Formatter(FormatterError::Codec(CodecError::TypeMismatch { .. }))
  ));

  let message = converter
    .encode(&Greeting {
      name: "Sam".to_string(),
    })
    .unwrap();
  let err = converter.decode::<Transfer>(&message).unwrap_err();
  assert!(matches!(
    err,
    ConverterError::Formatter(FormatterError::Codec(CodecError::TypeMismatch { .. }))
  ));
}

#[test]
fn test_description_failure_is_propagated() {
  let err = TypedMessageConverter::for_type::<Ambiguous>(Some("a"), &ConverterConfig::default()).unwrap_err();
  assert!(matches!(
    err,
    ConverterError::Description(DescriptionError::DuplicatePart { ref name, .. }) if name == "value"
  ));
}

#[test]
fn test_unsupported_xml_format_is_propagated() {
  let config = ConverterConfig::from_options([ConverterConfigOption::with_xml_serializer(
    XmlSerializerFormat::default().with_format_use(OperationFormatUse::Encoded),
  )]);
  let err = TypedMessageConverter::for_type::<Transfer>(Some("a"), &config).unwrap_err();
  assert!(matches!(
    err,
    ConverterError::Formatter(FormatterError::UnsupportedFormat(_))
  ));
}

#[test]
fn test_namespace_defaults_and_overrides() {
  let converter = TypedMessageConverter::for_type::<Greeting>(None, &ConverterConfig::default()).unwrap();
  let message = converter
    .encode(&Greeting {
      name: "Sam".to_string(),
    })
    .unwrap();
  assert!(matches!(
    message.body(),
    MessageBody::Structured { root: Some(root), .. } if *root == QualifiedName::new("Greeting", "http://tempuri.org/")
  ));

  let config = ConverterConfig::from_options([ConverterConfigOption::with_namespace("urn:greetings")]);
  let converter = TypedMessageConverter::for_type::<Greeting>(None, &config).unwrap();
  let message = converter
    .encode(&Greeting {
      name: "Sam".to_string(),
    })
    .unwrap();
  assert!(matches!(
    message.body(),
    MessageBody::Structured { root: Some(root), .. } if root.namespace() == "urn:greetings"
  ));
}

#[test]
fn test_cache_reuses_converters_per_key() {
  let cache = ConverterCache::new();
  let greeting = ContractType::of::<Greeting>();
  let config = ConverterConfig::default();

  let first = cache.get_or_create(Some(&greeting), Some("Hi"), &config).unwrap();
  let second = cache.get_or_create(Some(&greeting), Some("Hi"), &config).unwrap();
  assert_eq!(cache.len(), 1);
  assert_eq!(first.action(), second.action());

  let other_action = cache.get_or_create(Some(&greeting), Some("Hello"), &config).unwrap();
  assert_eq!(other_action.action(), Some("Hello"));
  let other_format = cache
    .get_or_create(Some(&ContractType::of::<Transfer>()), Some("Hi"), &xml_config())
    .unwrap();
  assert_eq!(other_format.action(), Some("Hi"));
  assert_eq!(cache.len(), 3);

  // Equal keys after default resolution share an entry.
  let explicit = ConverterConfig::default().with_namespace("http://tempuri.org/");
  cache.get_or_create(Some(&greeting), Some("Hi"), &explicit).unwrap();
  assert_eq!(cache.len(), 3);

  cache.clear();
  assert!(cache.is_empty());
}

#[test]
fn test_cache_does_not_keep_failures() {
  let cache = ConverterCache::new();
  let err = cache
    .get_or_create(Some(&ContractType::of::<Unmarked>()), Some("a"), &ConverterConfig::default())
    .unwrap_err();
  assert!(matches!(err, ConverterError::ArgumentInvalid { .. }));
  assert!(cache.is_empty());

  let err = cache.get_or_create(None, Some("a"), &ConverterConfig::default()).unwrap_err();
  assert_eq!(err, ConverterError::ArgumentMissing("contract_type"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_converter_is_shared_across_tasks() {
  init_tracing();
  let converter = Arc::new(
    TypedMessageConverter::for_type::<Transfer>(Some("urn:bank/transfer"), &ConverterConfig::default()).unwrap(),
  );

  let handles = (0..16_u64)
    .map(|i| {
      let converter = converter.clone();
      tokio::spawn(async move {
        let value = Transfer {
          cents: i,
          ..transfer()
        };
        let message = converter.encode(&value).unwrap();
        let decoded = converter.decode::<Transfer>(&message).unwrap();
        assert_eq!(decoded, value);
        decoded.cents
      })
    })
    .collect::<Vec<_>>();

  let mut total = 0;
  for handle in handles {
    total += handle.await.unwrap();
  }
  assert_eq!(total, (0..16).sum::<u64>());
}

#[test]
fn test_converter_outlives_its_config() {
  let config = ConverterConfig::default().with_format(FormatOption::XmlSerializer(XmlSerializerFormat::default()));
  let converter = TypedMessageConverter::for_type::<Greeting>(Some("Hi"), &config).unwrap();
  let cloned = converter.clone();
  drop(config);

  let message = cloned
    .encode(&Greeting {
      name: "Sam".to_string(),
    })
    .unwrap();
  assert!(matches!(message.body(), MessageBody::Xml { .. }));
}

#[rstest]
#[case::data_contract_padded(ConverterConfig::default(), profile("  Sam  ", None, &["a"]))]
#[case::data_contract_blank(ConverterConfig::default(), profile("   ", Some(" x "), &["a", " b"]))]
#[case::data_contract_no_tags(ConverterConfig::default(), profile("Sam", None, &[]))]
#[case::xml_serializer_padded(xml_config(), profile("  Sam  ", None, &["a"]))]
#[case::xml_serializer_blank(xml_config(), profile("   ", Some(" x "), &["a", " b"]))]
#[case::xml_serializer_line_breaks(xml_config(), profile("\n\tSam\r\n", Some("a < b & c"), &["x"]))]
fn test_round_trip_keeps_text_and_absent_values(#[case] config: ConverterConfig, #[case] value: Profile) {
  let converter = TypedMessageConverter::for_type::<Profile>(Some("urn:profile"), &config).unwrap();
  let message = converter.encode(&value).unwrap();
  assert_eq!(converter.decode::<Profile>(&message).unwrap(), value);
}

#[test]
fn test_xml_serializer_omits_absent_values() {
  let converter = TypedMessageConverter::for_type::<Profile>(None, &xml_config()).unwrap();
  let message = converter.encode(&profile("Sam", None, &["a"])).unwrap();
  assert!(matches!(
    message.body(),
    MessageBody::Xml { xml, .. } if xml == "<Profile xmlns=\"http://tempuri.org/\"><name>Sam</name><tags>a</tags></Profile>"
  ));
}

#[test]
fn test_xml_serializer_rejects_empty_sequences_when_encoding() {
  let converter = TypedMessageConverter::for_type::<Profile>(Some("urn:profile"), &xml_config()).unwrap();
  let err = converter.encode(&profile("Sam", None, &[])).unwrap_err();
  assert!(matches!(
    err,
    ConverterError::Formatter(FormatterError::Codec(CodecError::Encode(_)))
  ));
}

#[rstest]
#[case::data_contract_nan(ConverterConfig::default(), f64::NAN)]
#[case::data_contract_infinity(ConverterConfig::default(), f64::INFINITY)]
#[case::xml_serializer_nan(xml_config(), f64::NAN)]
#[case::xml_serializer_negative_infinity(xml_config(), f64::NEG_INFINITY)]
fn test_non_finite_floats_fail_when_encoding(#[case] config: ConverterConfig, #[case] value: f64) {
  let converter = TypedMessageConverter::for_type::<Measurement>(None, &config).unwrap();
  let err = converter.encode(&Measurement { value }).unwrap_err();
  assert!(matches!(
    err,
    ConverterError::Formatter(FormatterError::Codec(CodecError::Encode(_)))
  ));
}

#[test]
fn test_xml_body_with_foreign_document_element_is_rejected() {
  let converter = TypedMessageConverter::for_type::<Greeting>(Some("Hi"), &xml_config()).unwrap();
  let message = converter
    .encode(&Greeting {
      name: "Sam".to_string(),
    })
    .unwrap();
  let MessageBody::Xml { root, .. } = message.body() else {
    panic!("unexpected body: {:?}", message.body());
  };
  let forged = Envelope::new(
    MessageVersion::default(),
    MessageBody::Xml {
      root: root.clone(),
      xml: "<Other><name>x</name></Other>".to_string(),
    },
  )
  .with_action("Hi");
  assert!(matches!(
    converter.from_message(&forged).unwrap_err(),
    ConverterError::Formatter(FormatterError::UnexpectedBody { .. })
  ));
}
